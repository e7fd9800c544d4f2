use std::io;
use serde::Serialize;

pub const SUCCESS_MESSAGE: &str = "Dados enviados ao Kinesis com sucesso";

/// Current conditions as returned by the provider. The document is passed
/// through untouched; no field is ever read.
#[derive(Debug)]
pub struct WeatherReading(serde_json::Value);

impl WeatherReading {
    pub fn new(document: serde_json::Value) -> Self {
        Self(document)
    }

    pub fn document(&self) -> &serde_json::Value {
        &self.0
    }

    /// Compact JSON text, keys in the order the provider sent them.
    pub fn to_payload(&self) -> String {
        self.0.to_string()
    }
}

#[derive(Debug)]
pub struct PublishReceipt {
    pub shard_id: String,
    pub sequence_number: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum InvocationResult {
    Success,
    Failure { message: String },
}

impl InvocationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, InvocationResult::Success)
    }

    pub fn into_response(self) -> InvocationResponse {
        let (status_code, body) = match self {
            InvocationResult::Success => (200, SUCCESS_MESSAGE.to_string()),
            InvocationResult::Failure { message } => (500, format!("Error: {}", message)),
        };

        InvocationResponse {
            status_code,
            // The body is itself a JSON string literal, ASCII only.
            body: ascii_json_string(&body)
                .unwrap_or_else(|_| serde_json::Value::String(body).to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: String,
}

/// Writes every non-ASCII character as `\uXXXX` (UTF-16 units, lowercase hex).
struct AsciiFormatter;

impl serde_json::ser::Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

fn ascii_json_string(text: &str) -> Result<String, serde_json::Error> {
    let mut out = Vec::with_capacity(text.len() + 2);
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, AsciiFormatter);
    text.serialize(&mut serializer)?;
    // Only ASCII bytes are ever written.
    Ok(out.into_iter().map(char::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_maps_to_200_with_quoted_message() {
        let response = InvocationResult::Success.into_response();

        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "\"Dados enviados ao Kinesis com sucesso\"");
    }

    #[test]
    fn failure_maps_to_500_with_error_prefix() {
        let response = InvocationResult::Failure {
            message: "publish error: stream not found".to_string(),
        }
        .into_response();

        assert_eq!(response.status_code, 500);
        let body: String = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body, "Error: publish error: stream not found");
    }

    #[test]
    fn failure_body_escapes_non_ascii() {
        let response = InvocationResult::Failure {
            message: "estação não encontrada 🌧".to_string(),
        }
        .into_response();

        assert_eq!(
            response.body,
            r#""Error: esta\u00e7\u00e3o n\u00e3o encontrada \ud83c\udf27""#
        );
        assert!(response.body.is_ascii());
        let decoded: String = serde_json::from_str(&response.body).unwrap();
        assert_eq!(decoded, "Error: estação não encontrada 🌧");
    }

    #[test]
    fn failure_body_keeps_standard_escapes() {
        let response = InvocationResult::Failure {
            message: "bad \"value\"\n".to_string(),
        }
        .into_response();

        assert_eq!(response.body, r#""Error: bad \"value\"\n""#);
    }

    #[test]
    fn response_serializes_with_status_code_key() {
        let response = InvocationResult::Success.into_response();
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["statusCode"], json!(200));
        assert!(value.get("status_code").is_none());
    }

    #[test]
    fn payload_keeps_provider_key_order() {
        let raw = r#"{"zeta":1,"alpha":{"temperature":21.5},"data":[1,2]}"#;
        let reading = WeatherReading::new(serde_json::from_str(raw).unwrap());

        assert_eq!(reading.to_payload(), raw);
    }
}
