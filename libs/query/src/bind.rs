/// Bind values for positional (`$n`) SQL parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Text(String),
}

impl BindValue {
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(s) => s,
        }
    }
}

pub(crate) fn push_text(bind_params: &mut Vec<BindValue>, value: String) -> usize {
    bind_params.push(BindValue::Text(value));
    bind_params.len()
}
