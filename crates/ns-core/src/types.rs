use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<String>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptTag {
    pub src: Option<String>,
    pub inline_body: String,
}

impl ScriptTag {
    pub fn inline(body: impl Into<String>) -> Self {
        Self {
            src: None,
            inline_body: body.into(),
        }
    }

    pub fn external(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            inline_body: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TagOutcome {
    #[serde(rename_all = "camelCase")]
    Transcript { text: String },
    #[serde(rename_all = "camelCase")]
    LoadFailed { src: String, message: String },
}
