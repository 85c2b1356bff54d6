use std::path::PathBuf;
use thiserror::Error;

pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("File not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Malformed workbook: {0}")]
    MalformedInput(String),

    #[error("Failed to write workbook: {0}")]
    WriteFailed(String),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Invalid cell reference: {0}")]
    InvalidCellRef(String),

    #[error("Evaluation error: {0}")]
    Eval(String),

    #[error("#DIV/0! in {0}")]
    DivisionByZero(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_not_found_names_path() {
        let err = DashboardError::InputNotFound(PathBuf::from("missing/chamados.xlsx"));
        assert_eq!(err.to_string(), "File not found: missing/chamados.xlsx");
    }

    #[test]
    fn test_division_by_zero_names_formula() {
        let err = DashboardError::DivisionByZero("AVERAGE(Base_Dados!F:F)".to_string());
        assert_eq!(err.to_string(), "#DIV/0! in AVERAGE(Base_Dados!F:F)");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DashboardError = io.into();
        assert!(matches!(err, DashboardError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }
}
