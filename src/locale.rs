//! Locale profiles for generated spreadsheet formulas
//!
//! A profile carries the function names and argument separator a
//! spreadsheet in that locale expects, plus the dashboard's captions.

/// Function names, separator and captions for one locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleProfile {
    pub code: &'static str,
    /// Count non-empty cells (COUNTA)
    pub count_fn: &'static str,
    /// Count cells matching a condition (COUNTIF)
    pub countif_fn: &'static str,
    /// Arithmetic mean (AVERAGE)
    pub avg_fn: &'static str,
    /// Conditional (IF)
    pub if_fn: &'static str,
    pub arg_separator: char,
    pub labels: DashboardLabels,
}

/// Captions written next to the dashboard formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLabels {
    pub title: &'static str,
    pub total: &'static str,
    pub out_of_sla: &'static str,
    pub out_of_sla_pct: &'static str,
    pub avg_delay: &'static str,
}

pub const EN: LocaleProfile = LocaleProfile {
    code: "en",
    count_fn: "COUNTA",
    countif_fn: "COUNTIF",
    avg_fn: "AVERAGE",
    if_fn: "IF",
    arg_separator: ',',
    labels: DashboardLabels {
        title: "OPERATIONAL DASHBOARD – TICKETS",
        total: "Total Tickets",
        out_of_sla: "Tickets Out of SLA",
        out_of_sla_pct: "% Out of SLA",
        avg_delay: "Average Delay Days",
    },
};

pub const PT: LocaleProfile = LocaleProfile {
    code: "pt",
    count_fn: "CONT.VALORES",
    countif_fn: "CONT.SE",
    avg_fn: "MÉDIA",
    if_fn: "SE",
    arg_separator: ';',
    labels: DashboardLabels {
        title: "DASHBOARD OPERACIONAL – CHAMADOS",
        total: "Total de Chamados",
        out_of_sla: "Chamados Fora do SLA",
        out_of_sla_pct: "% Fora do SLA",
        avg_delay: "Média Dias em Atraso",
    },
};

static PROFILES: [&LocaleProfile; 2] = [&EN, &PT];

/// Codes accepted on the command line
pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "pt"];

impl LocaleProfile {
    /// Resolve a locale string to its profile, falling back to English
    ///
    /// Only the first two characters count, case-insensitively, so `pt-BR`
    /// and `PT_pt` both select Portuguese. Resolution never fails.
    pub fn resolve(locale: &str) -> &'static LocaleProfile {
        let key: String = locale.chars().take(2).collect::<String>().to_lowercase();
        PROFILES
            .iter()
            .copied()
            .find(|p| p.code == key)
            .unwrap_or(&EN)
    }
}
