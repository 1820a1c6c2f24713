//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Study Buddy Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[model]
# name = "gemini-2.0-flash"
# base_url = "https://generativelanguage.googleapis.com/v1beta"
# api_key = ""               # empty = read GEMINI_API_KEY from the environment
# connect_timeout_secs = 10
# request_timeout_secs = 0   # 0 = wait for the upstream indefinitely

[generation]
# temperature = 0.8          # 0.0-2.0
# top_p = 0.95               # 0.0-1.0
# top_k = 40                 # >= 1
# max_output_tokens = 8192   # 1-65536
# response_mime_type = "text/plain"

[persona]
# system_instruction = """..."""
# welcome_message = "Hi there! I'm your AI study assistant. ..."
# apology_message = "I'm sorry, I encountered an error. Please try again."

[logging]
# level = "INFO"             # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
