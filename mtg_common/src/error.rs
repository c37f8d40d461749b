//! Error types for the deck import service

use thiserror::Error;

/// Unified error type for deck import requests
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Failed to parse JSON response
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// Remote deck does not exist or is private
    #[error("Deck not found: {0}. Make sure the URL or ID is correct and the deck is public.")]
    DeckNotFound(String),
    /// Deck identifier is not a plain numeric id
    #[error("Invalid deck ID: {0}")]
    InvalidDeckId(String),
    /// Too many requests inside the current window
    #[error("Too many requests. Please try again in a minute.")]
    RateLimited,
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
