// 日志格式模板
// 将格式字符串编译为可复用的模板，字段：Noun、Level、Message、ExcludeBypass

use crate::errors::LogError;
use crate::logging::MessageContext;
use once_cell::sync::Lazy;
use regex::Regex;

/// 模板动作 `{{ ... }}`
static ACTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{\{\s*(.*?)\s*\}\}").expect("模板动作正则无效"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Noun,
    Level,
    Message,
    ExcludeBypass,
}

impl Field {
    fn parse(token: &str) -> Result<Self, LogError> {
        match token {
            ".Noun" => Ok(Self::Noun),
            ".Level" => Ok(Self::Level),
            ".Message" => Ok(Self::Message),
            ".ExcludeBypass" => Ok(Self::ExcludeBypass),
            other => Err(LogError::template_invalid(format!("未知字段: {}", other))),
        }
    }

    fn render(&self, mc: &MessageContext<'_>, out: &mut String) {
        match self {
            Self::Noun => out.push_str(mc.noun),
            Self::Level => out.push_str(mc.level.as_str()),
            Self::Message => out.push_str(mc.message),
            Self::ExcludeBypass => out.push_str(if mc.exclude_bypass { "true" } else { "false" }),
        }
    }

    fn is_truthy(&self, mc: &MessageContext<'_>) -> bool {
        match self {
            Self::Noun => !mc.noun.is_empty(),
            Self::Level => true,
            Self::Message => !mc.message.is_empty(),
            Self::ExcludeBypass => mc.exclude_bypass,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Field(Field),
    Cond {
        field: Field,
        negate: bool,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
}

/// 解析中尚未闭合的 if 块
struct Frame {
    field: Field,
    negate: bool,
    then: Vec<Node>,
    otherwise: Option<Vec<Node>>,
}

impl Frame {
    fn body(&mut self) -> &mut Vec<Node> {
        match &mut self.otherwise {
            Some(otherwise) => otherwise,
            None => &mut self.then,
        }
    }
}

/// 编译后的日志格式模板
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    nodes: Vec<Node>,
}

impl Template {
    /// 编译格式字符串
    pub fn compile(source: &str) -> Result<Self, LogError> {
        let mut root = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();
        let mut last = 0;

        for caps in ACTION.captures_iter(source) {
            let (Some(whole), Some(action)) = (caps.get(0), caps.get(1)) else {
                continue;
            };

            if whole.start() > last {
                let text = literal(&source[last..whole.start()])?;
                push_node(&mut root, &mut stack, Node::Text(text));
            }
            last = whole.end();

            let tokens: Vec<&str> = action.as_str().split_whitespace().collect();
            match tokens.as_slice() {
                ["if", condition @ ..] => {
                    let (field, negate) = parse_condition(condition)?;
                    stack.push(Frame {
                        field,
                        negate,
                        then: Vec::new(),
                        otherwise: None,
                    });
                }
                ["else"] => {
                    let frame = stack
                        .last_mut()
                        .ok_or_else(|| LogError::template_invalid("else 缺少对应的 if"))?;
                    if frame.otherwise.is_some() {
                        return Err(LogError::template_invalid("if 块中出现多个 else"));
                    }
                    frame.otherwise = Some(Vec::new());
                }
                ["end"] => {
                    let frame = stack
                        .pop()
                        .ok_or_else(|| LogError::template_invalid("end 缺少对应的 if"))?;
                    let node = Node::Cond {
                        field: frame.field,
                        negate: frame.negate,
                        then: frame.then,
                        otherwise: frame.otherwise.unwrap_or_default(),
                    };
                    push_node(&mut root, &mut stack, node);
                }
                [field] => {
                    let field = Field::parse(field)?;
                    push_node(&mut root, &mut stack, Node::Field(field));
                }
                _ => {
                    return Err(LogError::template_invalid(format!(
                        "无法识别的动作: {{{{{}}}}}",
                        action.as_str()
                    )));
                }
            }
        }

        if last < source.len() {
            let text = literal(&source[last..])?;
            push_node(&mut root, &mut stack, Node::Text(text));
        }

        if !stack.is_empty() {
            return Err(LogError::template_invalid("if 块未闭合"));
        }

        Ok(Self {
            source: source.to_string(),
            nodes: root,
        })
    }

    /// 原始格式字符串
    pub fn source(&self) -> &str {
        &self.source
    }

    /// 渲染消息
    pub fn render(&self, mc: &MessageContext<'_>) -> String {
        let mut out = String::with_capacity(self.source.len() + mc.message.len());
        render_nodes(&self.nodes, mc, &mut out);
        out
    }
}

fn push_node(root: &mut Vec<Node>, stack: &mut [Frame], node: Node) {
    match stack.last_mut() {
        Some(frame) => frame.body().push(node),
        None => root.push(node),
    }
}

/// 动作之间的纯文本；残留的 `{{` 说明动作未闭合
fn literal(text: &str) -> Result<String, LogError> {
    if let Some(offset) = text.find("{{") {
        return Err(LogError::template_invalid(format!(
            "动作未闭合: {}",
            &text[offset..]
        )));
    }

    Ok(text.to_string())
}

fn parse_condition(tokens: &[&str]) -> Result<(Field, bool), LogError> {
    match tokens {
        [field] => Ok((Field::parse(field)?, false)),
        ["not", field] => Ok((Field::parse(field)?, true)),
        ["eq", field, value @ ("true" | "false")] => {
            // 只有布尔字段可以与 true/false 比较
            let field = Field::parse(field)?;
            if field != Field::ExcludeBypass {
                return Err(LogError::template_invalid(format!(
                    "字段不是布尔值，无法与 {} 比较",
                    value
                )));
            }
            Ok((field, *value == "false"))
        }
        _ => Err(LogError::template_invalid(format!(
            "无法识别的条件: {}",
            tokens.join(" ")
        ))),
    }
}

fn render_nodes(nodes: &[Node], mc: &MessageContext<'_>, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Field(field) => field.render(mc, out),
            Node::Cond {
                field,
                negate,
                then,
                otherwise,
            } => {
                if field.is_truthy(mc) != *negate {
                    render_nodes(then, mc, out);
                } else {
                    render_nodes(otherwise, mc, out);
                }
            }
        }
    }
}
