use serde::Serialize;
use time::{OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem, macros::format_description};

use crate::users::User;

/// `9:05 pm`
const SHORT_TIME: &[BorrowedFormatItem<'static>] =
    format_description!("[hour repr:12 padding:none]:[minute] [period case:lower]");

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedMessage {
    pub username: String,
    pub text: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomUsers {
    pub room: String,
    pub users: Vec<User>,
}

pub(crate) fn format_at(
    username: &str,
    text: &str,
    at: OffsetDateTime,
    offset: UtcOffset,
) -> FormattedMessage {
    FormattedMessage {
        username: username.to_owned(),
        text: text.to_owned(),
        // formatting an OffsetDateTime never lacks components
        time: at.to_offset(offset).format(SHORT_TIME).unwrap_or_default(),
    }
}

pub(crate) fn format(username: &str, text: &str, offset: UtcOffset) -> FormattedMessage {
    format_at(username, text, OffsetDateTime::now_utc(), offset)
}
