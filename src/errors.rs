use std::fmt;

#[derive(Debug, Clone)]
pub enum AstrolabError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
    NotFound(String),
    Serialization(String),
    FileOperation(String),
    Http(String),
    NativeLibrary(String),
    Template(String),
    Auth(String),
}

impl AstrolabError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            AstrolabError::DatabaseConfig(_) => "E001",
            AstrolabError::DatabaseConnection(_) => "E002",
            AstrolabError::DatabaseOperation(_) => "E003",
            AstrolabError::Validation(_) => "E004",
            AstrolabError::NotFound(_) => "E005",
            AstrolabError::Serialization(_) => "E006",
            AstrolabError::FileOperation(_) => "E007",
            AstrolabError::Http(_) => "E008",
            AstrolabError::NativeLibrary(_) => "E009",
            AstrolabError::Template(_) => "E010",
            AstrolabError::Auth(_) => "E011",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            AstrolabError::DatabaseConfig(_) => "Database Configuration Error",
            AstrolabError::DatabaseConnection(_) => "Database Connection Error",
            AstrolabError::DatabaseOperation(_) => "Database Operation Error",
            AstrolabError::Validation(_) => "Validation Error",
            AstrolabError::NotFound(_) => "Resource Not Found",
            AstrolabError::Serialization(_) => "Serialization Error",
            AstrolabError::FileOperation(_) => "File Operation Error",
            AstrolabError::Http(_) => "HTTP Request Error",
            AstrolabError::NativeLibrary(_) => "Native Library Error",
            AstrolabError::Template(_) => "Template Error",
            AstrolabError::Auth(_) => "Authentication Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AstrolabError::DatabaseConfig(msg)
            | AstrolabError::DatabaseConnection(msg)
            | AstrolabError::DatabaseOperation(msg)
            | AstrolabError::Validation(msg)
            | AstrolabError::NotFound(msg)
            | AstrolabError::Serialization(msg)
            | AstrolabError::FileOperation(msg)
            | AstrolabError::Http(msg)
            | AstrolabError::NativeLibrary(msg)
            | AstrolabError::Template(msg)
            | AstrolabError::Auth(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于 CLI 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AstrolabError::NotFound(_))
    }
}

impl fmt::Display for AstrolabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AstrolabError {}

// 便捷的构造函数
impl AstrolabError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        AstrolabError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        AstrolabError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        AstrolabError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        AstrolabError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        AstrolabError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        AstrolabError::Serialization(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        AstrolabError::FileOperation(msg.into())
    }

    pub fn http<T: Into<String>>(msg: T) -> Self {
        AstrolabError::Http(msg.into())
    }

    pub fn native_library<T: Into<String>>(msg: T) -> Self {
        AstrolabError::NativeLibrary(msg.into())
    }

    pub fn template<T: Into<String>>(msg: T) -> Self {
        AstrolabError::Template(msg.into())
    }

    pub fn auth<T: Into<String>>(msg: T) -> Self {
        AstrolabError::Auth(msg.into())
    }
}

impl From<sea_orm::DbErr> for AstrolabError {
    fn from(err: sea_orm::DbErr) -> Self {
        AstrolabError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for AstrolabError {
    fn from(err: std::io::Error) -> Self {
        AstrolabError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AstrolabError {
    fn from(err: serde_json::Error) -> Self {
        AstrolabError::Serialization(err.to_string())
    }
}

impl From<tera::Error> for AstrolabError {
    fn from(err: tera::Error) -> Self {
        // tera 把真正的原因放在 source 链里
        let mut msg = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            msg.push_str(": ");
            msg.push_str(&cause.to_string());
            source = cause.source();
        }
        AstrolabError::Template(msg)
    }
}

impl From<ureq::Error> for AstrolabError {
    fn from(err: ureq::Error) -> Self {
        AstrolabError::Http(err.to_string())
    }
}

impl From<libloading::Error> for AstrolabError {
    fn from(err: libloading::Error) -> Self {
        AstrolabError::NativeLibrary(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AstrolabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let all = [
            AstrolabError::database_config(""),
            AstrolabError::database_connection(""),
            AstrolabError::database_operation(""),
            AstrolabError::validation(""),
            AstrolabError::not_found(""),
            AstrolabError::serialization(""),
            AstrolabError::file_operation(""),
            AstrolabError::http(""),
            AstrolabError::native_library(""),
            AstrolabError::template(""),
            AstrolabError::auth(""),
        ];
        let mut codes: Vec<_> = all.iter().map(|e| e.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn display_uses_simple_format() {
        let err = AstrolabError::not_found("bug 42");
        assert_eq!(err.to_string(), "Resource Not Found: bug 42");
        assert!(err.is_not_found());
    }

    #[test]
    fn io_error_converts_to_file_operation() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: AstrolabError = io.into();
        assert_eq!(err.code(), "E007");
        assert_eq!(err.message(), "gone");
    }
}
