// Bookshelf
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! High-level data types.

use bookshelf_core::model::{ModelError, ModelResult};
use derive_getters::Getters;
use derive_more::Constructor;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use time::Date;
use time::format_description::FormatItem;
use time::macros::format_description;

/// Generates a newtype for the database-assigned identifier of an entity.
macro_rules! entity_id [
    ( $name:ident, $what:literal ) => {
        #[doc = concat!("Identifier of ", $what, " as assigned by the database.")]
        #[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
        #[serde(transparent)]
        pub(crate) struct $name(i32);

        impl $name {
            #[doc = concat!("Creates an identifier for ", $what, " from its raw value.")]
            pub(crate) fn new(id: i32) -> Self {
                Self(id)
            }

            /// Returns the raw value of the identifier.
            pub(crate) fn as_i32(self) -> i32 {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> ModelResult<Self> {
                s.parse::<i32>()
                    .map(Self)
                    .map_err(|e| ModelError(format!("Invalid {} id '{}': {}", $what, s, e)))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    }
];

entity_id!(AuthorId, "author");
entity_id!(BookId, "book");

/// Canonical format of a publication date.
const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Alternate format accepted when parsing a publication date.
const SLASHED_DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]/[month]/[day]");

/// The calendar date on which a book was published.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub(crate) struct PublicationDate(Date);

impl PublicationDate {
    /// Creates a publication date from an already-valid `date`.
    pub(crate) fn from_date(date: Date) -> Self {
        Self(date)
    }

    /// Parses an untrusted string `s` as a `YYYY-MM-DD` or `YYYY/MM/DD` date.
    pub(crate) fn parse(s: &str) -> ModelResult<Self> {
        Date::parse(s, DATE_FORMAT)
            .or_else(|_| Date::parse(s, SLASHED_DATE_FORMAT))
            .map(Self)
            .map_err(|e| ModelError(format!("Invalid date '{}': {}", s, e)))
    }

    /// Returns the underlying date.
    pub(crate) fn as_date(self) -> Date {
        self.0
    }
}

impl fmt::Display for PublicationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self.0.format(DATE_FORMAT).map_err(|_| fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl Serialize for PublicationDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PublicationDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PublicationDate::parse(&raw).map_err(D::Error::custom)
    }
}

/// An author as stored in the database.
#[derive(Clone, Constructor, Getters, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
#[serde(rename_all = "camelCase")]
pub(crate) struct Author {
    /// Identifier of the author.
    id: AuthorId,

    /// Given name of the author.
    first_name: String,

    /// Family name of the author.
    last_name: String,
}

/// Contents of an author that does not exist yet.
#[derive(Constructor, Getters)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub(crate) struct NewAuthor {
    /// Given name of the author.
    first_name: String,

    /// Family name of the author.
    last_name: String,
}

/// Partial modification of an author.  Fields set to `None` keep their current value.
#[derive(Constructor, Default, Getters)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub(crate) struct AuthorPatch {
    /// New given name of the author.
    first_name: Option<String>,

    /// New family name of the author.
    last_name: Option<String>,
}

/// A book as stored in the database, including a summary of its author.
#[derive(Constructor, Getters, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
#[serde(rename_all = "camelCase")]
pub(crate) struct Book {
    /// Identifier of the book.
    id: BookId,

    /// Title of the book.
    title: String,

    /// Date on which the book was published.
    date_published: PublicationDate,

    /// Whether the book is a work of fiction.
    is_fiction: bool,

    /// Author of the book.
    author: Author,
}

/// Contents of a book that does not exist yet.
#[derive(Constructor, Getters)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub(crate) struct NewBook {
    /// Title of the book.
    title: String,

    /// Date on which the book was published.
    date_published: PublicationDate,

    /// Whether the book is a work of fiction.
    is_fiction: bool,

    /// Identifier of the author of the book, who must exist.
    author_id: AuthorId,
}

/// Partial modification of a book.  Fields set to `None` keep their current value.
#[derive(Constructor, Default, Getters)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub(crate) struct BookPatch {
    /// New title of the book.
    title: Option<String>,

    /// New publication date of the book.
    date_published: Option<PublicationDate>,

    /// New fiction flag of the book.
    is_fiction: Option<bool>,

    /// Identifier of the new author of the book, who must exist.
    author_id: Option<AuthorId>,
}
