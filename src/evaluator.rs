//! Evaluates the formulas written to a workbook
//!
//! Formula text is first brought to English function names and `,`
//! separators using the locale profile it was written with. Range aggregates
//! over whole columns (`COUNTA`, `COUNTIF`, `AVERAGE` on `Sheet!X:X`) are then
//! reduced to numbers against the referenced sheet, and what remains (plain
//! arithmetic, comparisons and `IF`) is handed to xlformula_engine with bare
//! cell references resolved recursively on the formula's own sheet.

use crate::error::{DashboardError, DashboardResult};
use crate::locale::{LocaleProfile, EN};
use crate::types::{column_letter_to_index, CellRef, CellValue, Sheet, Workbook};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use xlformula_engine::{calculate, parse_formula, types, NoCustomFunction};

/// Reference chains deeper than this are treated as circular
const MAX_DEPTH: usize = 32;

/// Functions left for xlformula_engine once aggregates are reduced
const ENGINE_FUNCTIONS: [&str; 4] = ["IF", "AND", "OR", "NOT"];

static FUNCTION_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\p{L}_][\p{L}\p{N}_.]*)\(").expect("function pattern is valid")
});

// FUNC(Sheet!X:Y) or FUNC('Sheet name'!X:Y,"criterion")
static RANGE_AGGREGATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\b(COUNTA|COUNTIF|AVERAGE)\((?:'((?:[^']|'')+)'|([^'!(),"]+))!\$?([A-Z]{1,3}):\$?([A-Z]{1,3})(?:,"((?:[^"]|"")*)")?\)"#,
    )
    .expect("aggregate pattern is valid")
});

pub struct FormulaEvaluator<'a> {
    workbook: &'a Workbook,
    sheet: &'a Sheet,
    profile: &'static LocaleProfile,
}

impl<'a> FormulaEvaluator<'a> {
    /// Evaluate the formulas of `sheet_name`, written in `profile`'s syntax
    pub fn new(
        workbook: &'a Workbook,
        sheet_name: &str,
        profile: &'static LocaleProfile,
    ) -> DashboardResult<Self> {
        let sheet = workbook
            .sheet(sheet_name)
            .ok_or_else(|| DashboardError::SheetNotFound(sheet_name.to_string()))?;

        Ok(Self {
            workbook,
            sheet,
            profile,
        })
    }

    /// Value of one cell; blank cells are `0`, as in arithmetic on a sheet
    pub fn evaluate_cell(&self, at: CellRef) -> DashboardResult<f64> {
        self.cell_value(at, 0)
    }

    /// Value of a formula as if it sat on this evaluator's sheet
    pub fn evaluate(&self, formula: &str) -> DashboardResult<f64> {
        self.evaluate_at_depth(formula, 0)
    }

    fn cell_value(&self, at: CellRef, depth: usize) -> DashboardResult<f64> {
        if depth > MAX_DEPTH {
            return Err(DashboardError::Eval(format!(
                "Circular reference through {}!{}",
                self.sheet.name, at
            )));
        }

        match self.sheet.get(at).map(|cell| &cell.value) {
            None => Ok(0.0),
            Some(CellValue::Formula(formula)) => self.evaluate_at_depth(formula, depth + 1),
            Some(CellValue::Number(n)) | Some(CellValue::DateTime(n)) => Ok(*n),
            Some(CellValue::Bool(b)) => Ok(if *b { 1.0 } else { 0.0 }),
            Some(CellValue::Text(text)) if text.is_empty() => Ok(0.0),
            Some(other) => Err(DashboardError::Eval(format!(
                "#VALUE! {} holds '{}'",
                at, other
            ))),
        }
    }

    fn evaluate_at_depth(&self, formula: &str, depth: usize) -> DashboardResult<f64> {
        let canonical = canonicalize(formula, self.profile);
        let reduced = self.reduce_aggregates(&canonical)?;

        if let Ok(value) = reduced.trim().parse::<f64>() {
            return Ok(value);
        }

        for caps in FUNCTION_CALL.captures_iter(&reduced) {
            if !ENGINE_FUNCTIONS.contains(&&caps[1]) {
                return Err(DashboardError::Eval(format!(
                    "#NAME? unknown function {} in {}",
                    &caps[1], formula
                )));
            }
        }

        let resolver = |reference: String| -> types::Value {
            match CellRef::parse(&reference).and_then(|at| self.cell_value(at, depth + 1)) {
                Ok(value) => types::Value::Number(value as f32),
                Err(DashboardError::DivisionByZero(_)) => types::Value::Error(types::Error::Div0),
                Err(_) => types::Value::Error(types::Error::Value),
            }
        };

        let parsed = parse_formula::parse_string_to_formula(
            &format!("={}", reduced),
            None::<NoCustomFunction>,
        );
        match calculate::calculate_formula(parsed, Some(&resolver)) {
            types::Value::Number(n) => Ok(round_result(n as f64)),
            types::Value::Boolean(types::Boolean::True) => Ok(1.0),
            types::Value::Boolean(_) => Ok(0.0),
            types::Value::Error(types::Error::Div0) => {
                Err(DashboardError::DivisionByZero(formula.to_string()))
            }
            other => Err(DashboardError::Eval(format!(
                "Formula '{}' returned {:?}",
                formula, other
            ))),
        }
    }

    /// Replace every whole-column aggregate with its value
    fn reduce_aggregates(&self, formula: &str) -> DashboardResult<String> {
        let mut result = formula.to_string();

        let captures: Vec<Captures> = RANGE_AGGREGATE.captures_iter(formula).collect();
        for caps in captures {
            let value = self.aggregate(&caps)?;
            result = result.replacen(&caps[0], &number_literal(value), 1);
        }

        Ok(result)
    }

    fn aggregate(&self, caps: &Captures) -> DashboardResult<f64> {
        let sheet_name = match (caps.get(2), caps.get(3)) {
            (Some(quoted), _) => quoted.as_str().replace("''", "'"),
            (None, Some(plain)) => plain.as_str().to_string(),
            (None, None) => String::new(),
        };
        let sheet = self
            .workbook
            .sheet(&sheet_name)
            .ok_or_else(|| DashboardError::SheetNotFound(sheet_name.clone()))?;

        let first = column_letter_to_index(&caps[4])
            .ok_or_else(|| DashboardError::InvalidCellRef(caps[4].to_string()))?;
        let last = column_letter_to_index(&caps[5])
            .ok_or_else(|| DashboardError::InvalidCellRef(caps[5].to_string()))?;
        let values = sheet
            .cells()
            .filter(|(at, _)| (first..=last).contains(&at.col))
            .map(|(_, cell)| &cell.value);

        match (&caps[1], caps.get(6)) {
            ("COUNTA", None) => Ok(values.filter(|v| !v.is_blank()).count() as f64),
            ("COUNTIF", Some(criterion)) => {
                let criterion = criterion.as_str().replace("\"\"", "\"");
                Ok(values.filter(|v| matches_criterion(v, &criterion)).count() as f64)
            }
            ("AVERAGE", None) => {
                let numbers: Vec<f64> = values.filter_map(CellValue::as_number).collect();
                if numbers.is_empty() {
                    return Err(DashboardError::DivisionByZero(caps[0].to_string()));
                }
                Ok(numbers.iter().sum::<f64>() / numbers.len() as f64)
            }
            _ => Err(DashboardError::Eval(format!(
                "Unsupported arguments in {}",
                &caps[0]
            ))),
        }
    }
}

/// English function names and `,` separators, quoted text left alone
fn canonicalize(formula: &str, profile: &LocaleProfile) -> String {
    let body = formula.trim().trim_start_matches('=');
    let names = [
        (profile.count_fn, EN.count_fn),
        (profile.countif_fn, EN.countif_fn),
        (profile.avg_fn, EN.avg_fn),
        (profile.if_fn, EN.if_fn),
    ];

    body.split('"')
        .enumerate()
        .map(|(i, segment)| {
            if i % 2 == 1 {
                return segment.to_string();
            }

            // `;`-separated locales write decimals with `,`
            let segment = if profile.arg_separator == ',' {
                segment.to_string()
            } else {
                segment
                    .replace(',', ".")
                    .replace(profile.arg_separator, ",")
            };

            FUNCTION_CALL
                .replace_all(&segment, |caps: &Captures| {
                    let name = caps[1].to_uppercase();
                    let canonical = names
                        .iter()
                        .find(|(local, _)| local.to_uppercase() == name)
                        .map_or(name.as_str(), |(_, english)| *english);
                    format!("{}(", canonical)
                })
                .into_owned()
        })
        .collect::<Vec<_>>()
        .join("\"")
}

/// COUNTIF equality: text case-insensitively, numbers and booleans by value
fn matches_criterion(value: &CellValue, criterion: &str) -> bool {
    match value {
        CellValue::Text(text) => text.to_lowercase() == criterion.to_lowercase(),
        CellValue::Number(n) | CellValue::DateTime(n) => {
            criterion.trim().parse::<f64>().is_ok_and(|c| c == *n)
        }
        CellValue::Bool(b) => criterion.eq_ignore_ascii_case(if *b { "TRUE" } else { "FALSE" }),
        CellValue::Formula(_) | CellValue::Error(_) => false,
    }
}

/// Literal the engine parses back; it has no unary minus
fn number_literal(value: f64) -> String {
    if value < 0.0 {
        format!("(0-{})", -value)
    } else {
        format!("{}", value)
    }
}

/// The engine computes in f32; spreadsheets have no negative zero
fn round_result(value: f64) -> f64 {
    (value * 1e6).round() / 1e6 + 0.0
}
