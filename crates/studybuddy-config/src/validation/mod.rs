//! Full configuration validation.
//!
//! Each section has its own validator; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod helpers;


use crate::schema::StudyBuddyConfig;
use helpers::{validate_not_blank, validate_range, validate_range_f64};
use studybuddy_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &StudyBuddyConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_model(&mut errors, config);
    validate_generation(&mut errors, config);
    validate_persona(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_model(errors: &mut Vec<String>, config: &StudyBuddyConfig) {
    let model = &config.model;
    validate_not_blank(errors, "model.name", &model.name);
    if !model.base_url.starts_with("http://") && !model.base_url.starts_with("https://") {
        errors.push(format!(
            "model.base_url = {:?} must start with http:// or https://",
            model.base_url
        ));
    }
}

fn validate_generation(errors: &mut Vec<String>, config: &StudyBuddyConfig) {
    let generation = &config.generation;
    validate_range_f64(errors, "generation.temperature", generation.temperature, 0.0, 2.0);
    validate_range_f64(errors, "generation.top_p", generation.top_p, 0.0, 1.0);
    validate_range(errors, "generation.top_k", generation.top_k, 1, u32::MAX);
    validate_range(
        errors,
        "generation.max_output_tokens",
        generation.max_output_tokens,
        1,
        65536,
    );
    validate_not_blank(errors, "generation.response_mime_type", &generation.response_mime_type);
}

fn validate_persona(errors: &mut Vec<String>, config: &StudyBuddyConfig) {
    validate_not_blank(errors, "persona.welcome_message", &config.persona.welcome_message);
    validate_not_blank(errors, "persona.apology_message", &config.persona.apology_message);
}
