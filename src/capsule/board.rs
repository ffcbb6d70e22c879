//! Session-local message board ("time capsule").
//!
//! Messages are kept in memory only and are gone when the app exits.

use bevy::prelude::*;
use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct CapsuleMessage {
    pub id: u64,
    pub city: String,
    pub author: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    NoCity,
    EmptyAuthor,
    EmptyMessage,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::NoCity => write!(f, "select a city first"),
            SubmitError::EmptyAuthor => write!(f, "your name is required"),
            SubmitError::EmptyMessage => write!(f, "the message is empty"),
        }
    }
}

impl std::error::Error for SubmitError {}

/// Check a submission without storing it.
pub fn validate(city: Option<&str>, author: &str, message: &str) -> Result<(), SubmitError> {
    if city.is_none() {
        return Err(SubmitError::NoCity);
    }
    if author.trim().is_empty() {
        return Err(SubmitError::EmptyAuthor);
    }
    if message.trim().is_empty() {
        return Err(SubmitError::EmptyMessage);
    }
    Ok(())
}

/// Append-only list of messages, newest first.
#[derive(Resource, Debug, Default)]
pub struct MessageBoard {
    messages: Vec<CapsuleMessage>,
    next_id: u64,
}

impl MessageBoard {
    /// Store a message for `city` (a city name). Author and message are kept
    /// as typed.
    pub fn submit(
        &mut self,
        city: Option<&str>,
        author: &str,
        message: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<&CapsuleMessage, SubmitError> {
        validate(city, author, message)?;
        let city = city.ok_or(SubmitError::NoCity)?;

        self.next_id += 1;
        self.messages.insert(
            0,
            CapsuleMessage {
                id: self.next_id,
                city: city.to_string(),
                author: author.to_string(),
                message: message.to_string(),
                timestamp,
            },
        );
        Ok(&self.messages[0])
    }

    /// Messages for `city`, or every message when no city is given.
    pub fn for_city<'a>(
        &'a self,
        city: Option<&'a str>,
    ) -> impl Iterator<Item = &'a CapsuleMessage> + 'a {
        self.messages
            .iter()
            .filter(move |m| city.is_none_or(|name| m.city == name))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
