use axum::{
    http::header,
    response::{IntoResponse, Response},
};

/// Options for the `<Record>` verb
#[derive(Debug, Clone)]
pub struct Record {
    pub action: String,
    pub max_length: u32,
    pub transcribe: bool,
}

#[derive(Debug, Clone)]
enum Verb {
    Say(String),
    Record(Record),
}

/// TwiML document returned to the telephony provider.
///
/// Verbs are rendered in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct VoiceResponse {
    verbs: Vec<Verb>,
}

impl VoiceResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn say(mut self, text: impl Into<String>) -> Self {
        self.verbs.push(Verb::Say(text.into()));
        self
    }

    pub fn record(mut self, record: Record) -> Self {
        self.verbs.push(Verb::Record(record));
        self
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?><Response>"#);
        for verb in &self.verbs {
            match verb {
                Verb::Say(text) => {
                    xml.push_str("<Say>");
                    xml.push_str(&escape(text));
                    xml.push_str("</Say>");
                }
                Verb::Record(record) => {
                    xml.push_str(&format!(
                        r#"<Record action="{}" maxLength="{}" transcribe="{}" />"#,
                        escape(&record.action),
                        record.max_length,
                        record.transcribe
                    ));
                }
            }
        }
        xml.push_str("</Response>");
        xml
    }
}

impl IntoResponse for VoiceResponse {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, "text/xml")], self.to_xml()).into_response()
    }
}

/// Escape markup characters and drop characters XML 1.0 does not allow.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\t' | '\n' | '\r' => out.push(c),
            '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => {}
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
