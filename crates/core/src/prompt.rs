//! Coaching prompt construction
//!
//! The template ships with the crate and carries `{sales_rep_names}`,
//! `{merchant_names}` and `{transcript}` placeholders. Substitution is a
//! single pass, so braces inside a transcript are never expanded.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::analysis::AnalyzeRequest;

pub const COACHING_TEMPLATE: &str = include_str!("../templates/coaching.md");

fn placeholder_regex() -> &'static Regex {
    static RE_PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    RE_PLACEHOLDER
        .get_or_init(|| Regex::new(r"\{(sales_rep_names|merchant_names|transcript)\}").unwrap())
}

/// Fill `template` with the request fields. Unknown placeholders are left as is.
pub fn render_template(template: &str, request: &AnalyzeRequest) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &Captures| match &caps[1] {
            "sales_rep_names" => request.sales_rep_names.clone(),
            "merchant_names" => request.merchant_names.clone(),
            _ => request.transcript.clone(),
        })
        .into_owned()
}

pub fn build_prompt(request: &AnalyzeRequest) -> String {
    render_template(COACHING_TEMPLATE, request)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(transcript: &str) -> AnalyzeRequest {
        AnalyzeRequest {
            transcript: transcript.to_string(),
            sales_rep_names: "Alice".to_string(),
            merchant_names: "Customer".to_string(),
        }
    }

    #[test]
    fn test_render_template_fills_all_fields() {
        let out = render_template(
            "Rep: {sales_rep_names} / Merchant: {merchant_names}\n{transcript}",
            &request("Alice: hi"),
        );
        assert_eq!(out, "Rep: Alice / Merchant: Customer\nAlice: hi");
    }

    #[test]
    fn test_render_template_does_not_expand_inside_values() {
        let out = render_template("{transcript}|{merchant_names}", &request("say {merchant_names}"));
        assert_eq!(out, "say {merchant_names}|Customer");
    }

    #[test]
    fn test_render_template_keeps_unknown_placeholders() {
        assert_eq!(render_template("{other}", &request("t")), "{other}");
    }

    #[test]
    fn test_build_prompt_uses_coaching_template() {
        let prompt = build_prompt(&request("Alice: How is business?"));
        assert!(prompt.contains("Sales Rep(s): Alice. Merchant(s): Customer."));
        assert!(prompt.contains("Alice: How is business?"));
        assert!(prompt.contains("NEED_SPEAKER_ROLES"));
        assert!(prompt.contains("Coaching tips:"));
        assert!(!prompt.contains("{transcript}"));
    }
}
