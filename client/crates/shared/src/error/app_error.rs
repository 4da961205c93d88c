//! Application Error - Unified error type surfaced to the user
//!
//! Defines [`AppError`] struct and [`AppResult<T>`] type alias.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// ポータル統一エラー型
///
/// 画面（またはターミナル）に表示するバナー文言と、その原因をまとめます。
///
/// ## Fields
/// * `kind` - エラーの分類
/// * `message` - ユーザー向けのエラーメッセージ
/// * `action` - ユーザーが取るべきアクション（オプション）
/// * `source` - 元のエラー（オプション、ログ用）
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::for_user(ErrorKind::Unauthorized, "Your session has expired.");
/// assert_eq!(err.banner(), "Your session has expired. Please log in again.");
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    action: Option<Cow<'static, str>>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// `Result<T, AppError>` の省略形
pub type AppResult<T> = Result<T, AppError>;

/// 再ログインを促すアクション文言
pub const SIGN_IN_ACTION: &str = "Please log in again";

impl AppError {
    /// 新しいエラーを作成
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
            source: None,
        }
    }

    /// ユーザー向けエラーを作成
    ///
    /// 再ログインで解消する種別には [`SIGN_IN_ACTION`] を付与します。
    pub fn for_user(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        let error = Self::new(kind, message);
        if kind.requires_sign_in() {
            error.with_action(SIGN_IN_ACTION)
        } else {
            error
        }
    }

    /// 400 Bad Request エラー
    #[inline]
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    /// 404 Not Found エラー
    #[inline]
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// ユーザー向けアクションを設定
    #[inline]
    pub fn with_action(mut self, action: impl Into<Cow<'static, str>>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// 元のエラーを設定
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// サーバー側のエラーかどうか
    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }

    /// バナー表示用の一行テキスト（アクションがあれば後置）
    pub fn banner(&self) -> String {
        match &self.action {
            Some(action) if self.message.ends_with(['.', '!', '?']) => {
                format!("{} {}.", self.message, action)
            }
            Some(action) => format!("{}. {}.", self.message, action),
            None => self.message.to_string(),
        }
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("action", &self.action)
            .field("source", &self.source.as_ref().map(|e| e.to_string()))
            .finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(action) = &self.action {
            write!(f, " (Action: {})", action)?;
        }
        Ok(())
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_user_adds_sign_in_action() {
        let err = AppError::for_user(ErrorKind::Unauthorized, "Not signed in");
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(err.action(), Some(SIGN_IN_ACTION));
        assert_eq!(err.banner(), "Not signed in. Please log in again.");

        let err = AppError::for_user(ErrorKind::Conflict, "User ID already taken");
        assert!(err.action().is_none());
        assert_eq!(err.banner(), "User ID already taken");
    }

    #[test]
    fn test_banner_keeps_existing_punctuation() {
        let err = AppError::for_user(ErrorKind::Unauthorized, "Your session has expired.");
        assert_eq!(err.banner(), "Your session has expired. Please log in again.");
        assert_eq!(AppError::bad_request("Boom").banner(), "Boom");
    }

    #[test]
    fn test_display() {
        let err = AppError::bad_request("Invalid input");
        assert_eq!(err.to_string(), "[Bad Request] Invalid input");

        let err = AppError::not_found("Page not found").with_action("Go home");
        assert!(err.to_string().contains("Action: Go home"));
    }

    #[test]
    fn test_with_source() {
        let io_err = std::io::Error::other("disk full");
        let err = AppError::new(ErrorKind::InternalServerError, "Failed to write cookie jar")
            .with_source(io_err);
        assert!(err.source().is_some());
        assert!(err.is_server_error());
    }
}
