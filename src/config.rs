//! Configuration manager: `[Configuration]` blocks remap keyword spellings and
//! declare user origin types (spec §4.3 Configuration production, §6.3 option
//! table). Split into `Configuration` (one parsed block) and
//! `ConfigurationRegistry` (the set of configurations for one compilation),
//! mirroring the original implementation's `ConfigurationManager` /
//! `ConfigurationParser` split.

use indexmap::IndexMap;

use crate::diagnostics::ConfigError;

/// A single named or anonymous `[Configuration]` block, fully parsed.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub name: Option<String>,
    options: IndexMap<String, OptionValue>,
    /// `[Name]` block: keyword key (e.g. `CUSTOM_STYLE`) -> accepted spellings.
    name_remap: IndexMap<String, Vec<String>>,
    /// `[OriginType]` block: user type name (e.g. `Vue`) -> full `@Name` spelling.
    origin_type_remap: IndexMap<String, String>,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl OptionValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            OptionValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

/// The cap on alternatives per `[Name]` entry (§6.3 `OPTION_COUNT`), applied
/// while a `Configuration` is being built by the parser.
const DEFAULT_OPTION_COUNT: usize = 8;

impl Configuration {
    pub fn new(name: Option<String>, is_default: bool) -> Self {
        let mut cfg = Configuration {
            name,
            options: IndexMap::new(),
            name_remap: IndexMap::new(),
            origin_type_remap: IndexMap::new(),
            is_default,
        };
        cfg.install_builtin_defaults();
        cfg
    }

    fn install_builtin_defaults(&mut self) {
        self.options.insert("INDEX_INITIAL_COUNT".into(), OptionValue::Int(0));
        self.options.insert("DEBUG_MODE".into(), OptionValue::Bool(false));
        self.options.insert("DISABLE_NAME_GROUP".into(), OptionValue::Bool(false));
        self.options.insert("DISABLE_CUSTOM_ORIGIN_TYPE".into(), OptionValue::Bool(false));
        self.options.insert("DISABLE_STYLE_AUTO_ADD_CLASS".into(), OptionValue::Bool(false));
        self.options.insert("DISABLE_STYLE_AUTO_ADD_ID".into(), OptionValue::Bool(false));
        self.options.insert("DISABLE_SCRIPT_AUTO_ADD_CLASS".into(), OptionValue::Bool(true));
        self.options.insert("DISABLE_SCRIPT_AUTO_ADD_ID".into(), OptionValue::Bool(true));
        self.options.insert("DISABLE_DEFAULT_NAMESPACE".into(), OptionValue::Bool(false));
        self.options
            .insert("OPTION_COUNT".into(), OptionValue::Int(DEFAULT_OPTION_COUNT as i64));
    }

    pub fn set_option(&mut self, key: &str, value: OptionValue) -> Result<(), ConfigError> {
        if !self.options.contains_key(key) {
            return Err(ConfigError::UnknownOption(key.to_string()));
        }
        self.options.insert(key.to_string(), value);
        Ok(())
    }

    pub fn get_option(&self, key: &str) -> Option<&OptionValue> {
        self.options.get(key)
    }

    pub fn index_initial_count(&self) -> i64 {
        self.options.get("INDEX_INITIAL_COUNT").and_then(OptionValue::as_int).unwrap_or(0)
    }

    pub fn is_debug_mode(&self) -> bool {
        self.bool_option("DEBUG_MODE")
    }

    pub fn is_name_group_disabled(&self) -> bool {
        self.bool_option("DISABLE_NAME_GROUP")
    }

    pub fn is_custom_origin_type_disabled(&self) -> bool {
        self.bool_option("DISABLE_CUSTOM_ORIGIN_TYPE")
    }

    pub fn is_style_auto_add_class_disabled(&self) -> bool {
        self.bool_option("DISABLE_STYLE_AUTO_ADD_CLASS")
    }

    pub fn is_style_auto_add_id_disabled(&self) -> bool {
        self.bool_option("DISABLE_STYLE_AUTO_ADD_ID")
    }

    pub fn is_script_auto_add_class_disabled(&self) -> bool {
        self.bool_option("DISABLE_SCRIPT_AUTO_ADD_CLASS")
    }

    pub fn is_script_auto_add_id_disabled(&self) -> bool {
        self.bool_option("DISABLE_SCRIPT_AUTO_ADD_ID")
    }

    pub fn is_default_namespace_disabled(&self) -> bool {
        self.bool_option("DISABLE_DEFAULT_NAMESPACE")
    }

    pub fn option_count(&self) -> usize {
        self.options.get("OPTION_COUNT").and_then(OptionValue::as_int).unwrap_or(DEFAULT_OPTION_COUNT as i64) as usize
    }

    fn bool_option(&self, key: &str) -> bool {
        self.options.get(key).and_then(OptionValue::as_bool).unwrap_or(false)
    }

    /// Record a `[Name]` entry: `key = alternative` or `key = [alt1, alt2, ...]`.
    pub fn set_name_alternatives(&mut self, key: &str, alternatives: Vec<String>) -> Result<(), ConfigError> {
        if self.is_name_group_disabled() {
            return Ok(());
        }
        let limit = self.option_count();
        if alternatives.len() > limit {
            return Err(ConfigError::TooManyAlternatives { key: key.to_string(), limit });
        }
        self.name_remap.insert(key.to_string(), alternatives);
        Ok(())
    }

    pub fn name_alternatives(&self, key: &str) -> Option<&[String]> {
        self.name_remap.get(key).map(|v| v.as_slice())
    }

    /// Resolve a keyword lexeme to its canonical `[Name]` key, if it was
    /// remapped. Returns `None` when the lexeme is unmapped and the lexer
    /// should fall back to the builtin table.
    pub fn map_keyword(&self, lexeme: &str) -> Option<&str> {
        if self.is_name_group_disabled() {
            return None;
        }
        self.name_remap
            .iter()
            .find(|(_, alts)| alts.iter().any(|a| a == lexeme))
            .map(|(key, _)| key.as_str())
    }

    pub fn is_valid_keyword(&self, lexeme: &str, key: &str) -> bool {
        self.name_remap.get(key).is_some_and(|alts| alts.iter().any(|a| a == lexeme))
    }

    /// Register `[OriginType] ORIGINTYPE_X = @X;`.
    pub fn register_origin_type(&mut self, type_name: &str, full_spelling: &str) {
        self.origin_type_remap.insert(type_name.to_string(), full_spelling.to_string());
    }

    pub fn is_known_origin_type(&self, type_name: &str) -> bool {
        !self.is_custom_origin_type_disabled() && self.origin_type_remap.contains_key(type_name)
    }

    pub fn origin_types(&self) -> impl Iterator<Item = (&str, &str)> {
        self.origin_type_remap.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new(None, true)
    }
}

/// Owns every `[Configuration]` block seen during one compilation, plus which
/// one is active. Per spec §9 "the core never merges configurations": two
/// anonymous blocks are a hard error, surfaced by [`ConfigurationRegistry::add`].
#[derive(Debug, Default)]
pub struct ConfigurationRegistry {
    named: IndexMap<String, Configuration>,
    default: Option<Configuration>,
    active: Option<String>,
}

impl ConfigurationRegistry {
    pub fn new() -> Self {
        ConfigurationRegistry::default()
    }

    pub fn add(&mut self, config: Configuration) -> Result<(), ConfigError> {
        match &config.name {
            Some(name) => {
                let first = self.default.is_none() && self.named.is_empty();
                if first {
                    self.active = Some(name.clone());
                }
                self.named.insert(name.clone(), config);
                Ok(())
            }
            None => {
                if self.default.is_some() {
                    return Err(ConfigError::ConflictingDefaults);
                }
                self.default = Some(config);
                Ok(())
            }
        }
    }

    pub fn activate(&mut self, name: &str) -> bool {
        if self.named.contains_key(name) {
            self.active = Some(name.to_string());
            true
        } else {
            false
        }
    }

    /// The currently active configuration, falling back to the anonymous
    /// default, and finally to a fresh builtin `Configuration` when none was
    /// ever declared.
    pub fn active(&self) -> std::borrow::Cow<'_, Configuration> {
        if let Some(name) = &self.active {
            if let Some(cfg) = self.named.get(name) {
                return std::borrow::Cow::Borrowed(cfg);
            }
        }
        if let Some(cfg) = &self.default {
            return std::borrow::Cow::Borrowed(cfg);
        }
        std::borrow::Cow::Owned(Configuration::default())
    }

    pub fn get(&self, name: &str) -> Option<&Configuration> {
        self.named.get(name)
    }
}
