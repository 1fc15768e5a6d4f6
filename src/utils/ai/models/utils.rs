/// Fine-tuned variants of this base model share its price entry
pub const FINE_TUNED_GPT_35_TURBO: &str = "ft:gpt-3.5-turbo";

pub struct ModelUtils;

impl ModelUtils {
    /// Lower-case a model identifier
    pub fn normalize(model: &str) -> String {
        model.to_lowercase()
    }

    /// Collapse `ft:gpt-3.5-turbo...` to `ft:gpt-3.5-turbo`; identity otherwise
    pub fn strip_ft_model_name(model: &str) -> String {
        if model.starts_with(FINE_TUNED_GPT_35_TURBO) {
            return FINE_TUNED_GPT_35_TURBO.to_string();
        }
        model.to_string()
    }

    /// Keep only the part after the last `/` of a provider-qualified name
    pub fn strip_provider_prefix(model: &str) -> &str {
        match model.rfind('/') {
            Some(pos) => &model[pos + 1..],
            None => model,
        }
    }

    /// Key used for price table lookups: lower-cased and fine-tune stripped.
    ///
    /// Provider prefixes are kept, the table is keyed by the qualified name.
    pub fn pricing_key(model: &str) -> String {
        Self::strip_ft_model_name(&Self::normalize(model))
    }

    /// Name used for tokenizer lookups: lower-cased, provider prefix removed
    pub fn tokenizer_name(model: &str) -> String {
        Self::strip_provider_prefix(&Self::normalize(model)).to_string()
    }

    /// Provider segment of a qualified name, if any
    pub fn get_provider_from_model(model: &str) -> Option<&str> {
        model.rfind('/').map(|pos| &model[..pos])
    }
}

/// Strip the fine-tuned model name to get the base model name for cost info
pub fn strip_ft_model_name(model: &str) -> String {
    ModelUtils::strip_ft_model_name(model)
}
