// crates/hashdb-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Provides message catalog and translation utilities for the CLI.
// Purpose: Centralize user-facing diagnostics and reports.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! Diagnostics, progress lines, and the stats report are stored in a small
//! translation catalog and routed through the [`t!`](crate::t) macro. Lookup
//! result lines are not catalogued; see [`crate::render`].
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
///
/// # Invariants
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Catalan.
    Ca,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ca => "ca",
        }
    }

    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_', '.']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "ca" => Some(Self::Ca),
            _ => None,
        }
    }
}

/// Ordered list of supported CLI locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Ca];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
///
/// # Invariants
/// - `key` matches a placeholder name without braces (for example, `path`).
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("store.open_failed", "Failed to open store at {path}: {error}"),
    ("lookup.usage", "Usage: hashdb <sha256> <sha1> <md5> <crc32>  |  hashdb -f <file>"),
    ("lookup.invalid_digest", "Invalid digest: {error}"),
    ("lookup.decode_warning", "Warning: stored value for {sha256} could not be decoded: {error}"),
    ("batch.open_failed", "Failed to open job file {path}: {error}"),
    ("batch.failed", "Batch lookup failed: {error}"),
    ("batch.invalid_line", "Invalid line {line}: {error}"),
    ("migrate.progress", "Migrated {count} records"),
    ("migrate.done", "Done! Migrated {count} records total"),
    ("migrate.audit_open_failed", "Failed to open audit log {path}: {error}"),
    ("migrate.failed", "Migration failed: {error}"),
    ("stats.failed", "Failed to read store statistics: {error}"),
    ("stats.header", "=== Store Statistics ==="),
    ("stats.database", "  Database info:"),
    ("stats.keys", "    Estimated keys:              {count}"),
    ("stats.sst", "    Total SST files on disk:     {size}"),
    ("stats.filter.header", "  Bloom filter memory:"),
    ("stats.filter.keys", "    Keys:           {count}"),
    ("stats.filter.bits", "    Bits per key:   {bits}"),
    ("stats.filter.size", "    Filter size:    {size}  (formula: keys x bits / 8)"),
    ("stats.filter.share", "    % of DB size:   {percent}%"),
    ("stats.filter.share_unknown", "    % of DB size:   n/a"),
];

/// Static Catalan catalog entries.
const CATALOG_CA: &[(&str, &str)] = &[
    ("i18n.lang.invalid_env", "Valor no vàlid per a {env}: {value}. S'esperava 'en' o 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: la sortida que no és en anglès està traduïda automàticament i pot ser inexacta.",
    ),
    ("output.stream.stdout", "sortida estàndard"),
    ("output.stream.stderr", "sortida d'error"),
    ("output.write_failed", "No s'ha pogut escriure a {stream}: {error}"),
    ("config.load_failed", "No s'ha pogut carregar la configuració: {error}"),
    ("store.open_failed", "No s'ha pogut obrir el magatzem a {path}: {error}"),
    ("lookup.usage", "Ús: hashdb <sha256> <sha1> <md5> <crc32>  |  hashdb -f <fitxer>"),
    ("lookup.invalid_digest", "Resum no vàlid: {error}"),
    (
        "lookup.decode_warning",
        "Avís: no s'ha pogut descodificar el valor desat per a {sha256}: {error}",
    ),
    ("batch.open_failed", "No s'ha pogut obrir el fitxer de treball {path}: {error}"),
    ("batch.failed", "La cerca per lots ha fallat: {error}"),
    ("batch.invalid_line", "Línia no vàlida {line}: {error}"),
    ("migrate.progress", "Migrats {count} registres"),
    ("migrate.done", "Fet! Migrats {count} registres en total"),
    ("migrate.audit_open_failed", "No s'ha pogut obrir el registre d'auditoria {path}: {error}"),
    ("migrate.failed", "La migració ha fallat: {error}"),
    ("stats.failed", "No s'han pogut llegir les estadístiques del magatzem: {error}"),
    ("stats.header", "=== Estadístiques del magatzem ==="),
    ("stats.database", "  Informació de la base de dades:"),
    ("stats.keys", "    Claus estimades:             {count}"),
    ("stats.sst", "    Fitxers SST al disc:         {size}"),
    ("stats.filter.header", "  Memòria del filtre de Bloom:"),
    ("stats.filter.keys", "    Claus:          {count}"),
    ("stats.filter.bits", "    Bits per clau:  {bits}"),
    ("stats.filter.size", "    Mida del filtre: {size}  (fórmula: claus x bits / 8)"),
    ("stats.filter.share", "    % de la mida:   {percent}%"),
    ("stats.filter.share_unknown", "    % de la mida:   n/a"),
];

/// Returns the raw catalog entries for the requested locale.
pub(crate) const fn catalog_entries_for(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::Ca => CATALOG_CA,
    }
}

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_CA_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    let map = match locale {
        Locale::En => &CATALOG_EN_MAP,
        Locale::Ca => &CATALOG_CA_MAP,
    };
    map.get_or_init(|| catalog_entries_for(locale).iter().copied().collect())
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    translate_for(current_locale(), key, args)
}

/// Translates `key` for an explicit locale.
#[must_use]
pub fn translate_for(locale: Locale, key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }
    substitute(template, &args)
}

/// Replaces each `{name}` in `template` with its argument in one pass.
///
/// Substituted values are never rescanned, so a value that itself contains
/// `{name}` is emitted verbatim. Unknown placeholders are left in place.
fn substitute(template: &str, args: &[MessageArg]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        result.push_str(&rest[.. open]);
        let after = &rest[open + 1 ..];
        let Some(close) = after.find('}') else {
            rest = &rest[open ..];
            break;
        };
        let name = &after[.. close];
        match args.iter().find(|arg| arg.key == name) {
            Some(arg) => result.push_str(&arg.value),
            None => {
                result.push('{');
                result.push_str(name);
                result.push('}');
            }
        }
        rest = &after[close + 1 ..];
    }
    result.push_str(rest);
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
///
/// # Returns
///
/// A localized [`String`] with placeholders substituted.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
