//! Request and response payloads for the Gemini `generateContent` API.

use serde::{Deserialize, Serialize};

/// Request envelope: one user turn carrying the prompt text.
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

impl GenerateContentRequest {
    /// Wrap a prompt in the single-turn request shape.
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_owned(),
                }],
            }],
        }
    }
}

/// Response envelope; only the candidate text is of interest.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateContentResponse {
    /// Concatenate the first candidate's text parts into one completion.
    pub fn into_text(self) -> Result<String, String> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| "completion contained no candidates".to_owned())?;
        let parts = candidate
            .content
            .ok_or_else(|| "candidate contained no content".to_owned())?
            .parts;
        if parts.is_empty() {
            return Err("candidate contained no text parts".to_owned());
        }
        Ok(parts.into_iter().map(|part| part.text).collect())
    }
}
