//! Templates module for embedded resource-list templates
//! The template is embedded at compile time using the include_str! macro

/// Default name of the resource list, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "l1onResources.json";

/// Get the default resource list template content
pub fn get_resources_template() -> &'static str {
    include_str!("../../templates/l1onResources.json")
}
