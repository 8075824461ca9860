//! # Attribute edit requests
//!
//! An [`EditRequest`] is the immutable description of one user edit: whose record is
//! being changed and an [`AttributeEdit`] carrying only the fields its category needs.
//! An image edit holds an optional [`Asset`] and no text; text edits hold the raw
//! input value and no asset.
//!
//! Callers holding a category string and a [`ChangeInput`] build requests with
//! [`EditRequest::from_input`]; the string is parsed into a [`Category`], where any
//! unrecognised name becomes [`Category::Text`].

use std::convert::Infallible;
use std::str::FromStr;

use crate::input::ChangeInput;

/// A binary payload selected by the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Asset {
    bytes: Vec<u8>,
}

impl Asset {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Which attribute an editor surface is bound to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Category {
    Image,
    Nickname,
    Password,
    Text(String),
}

impl FromStr for Category {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Image" => Category::Image,
            "Nickname" => Category::Nickname,
            "Password" => Category::Password,
            other => Category::Text(other.to_string()),
        })
    }
}

/// The change requested for one attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttributeEdit {
    /// Replace the profile image. `None` means no file was selected.
    Image(Option<Asset>),
    Nickname(String),
    Password(String),
    /// A text attribute with no dedicated remote endpoint.
    Text { field: String, value: String },
    /// Restore the default profile image.
    ResetImage,
}

impl AttributeEdit {
    /// The text value this edit commits, if it is a text edit.
    pub fn text_value(&self) -> Option<&str> {
        match self {
            AttributeEdit::Nickname(value)
            | AttributeEdit::Password(value)
            | AttributeEdit::Text { value, .. } => Some(value),
            AttributeEdit::Image(_) | AttributeEdit::ResetImage => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AttributeEdit::Image(_) => "image",
            AttributeEdit::Nickname(_) => "nickname",
            AttributeEdit::Password(_) => "password",
            AttributeEdit::Text { .. } => "text",
            AttributeEdit::ResetImage => "reset_image",
        }
    }
}

/// One edit of one user's record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditRequest {
    pub subject_id: String,
    pub edit: AttributeEdit,
}

impl EditRequest {
    pub fn new(subject_id: impl Into<String>, edit: AttributeEdit) -> Self {
        Self {
            subject_id: subject_id.into(),
            edit,
        }
    }

    /// Build a request from an editor surface's category, input and selected file.
    ///
    /// The asset is only kept for [`Category::Image`]; the input value is ignored
    /// for it.
    pub fn from_input(
        category: &Category,
        subject_id: impl Into<String>,
        input: &ChangeInput,
        asset: Option<Asset>,
    ) -> Self {
        let value = input.value().to_string();
        let edit = match category {
            Category::Image => AttributeEdit::Image(asset),
            Category::Nickname => AttributeEdit::Nickname(value),
            Category::Password => AttributeEdit::Password(value),
            Category::Text(field) => AttributeEdit::Text {
                field: field.clone(),
                value,
            },
        };
        Self::new(subject_id, edit)
    }

    pub fn reset_image(subject_id: impl Into<String>) -> Self {
        Self::new(subject_id, AttributeEdit::ResetImage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!("Image".parse::<Category>().unwrap(), Category::Image);
        assert_eq!("Nickname".parse::<Category>().unwrap(), Category::Nickname);
        assert_eq!(
            "Bio".parse::<Category>().unwrap(),
            Category::Text("Bio".to_string())
        );
    }

    #[test]
    fn test_image_request_drops_text() {
        let input = ChangeInput::new("https://x/current");
        let request = EditRequest::from_input(
            &Category::Image,
            "u1",
            &input,
            Some(Asset::new(vec![1, 2])),
        );
        assert_eq!(request.edit, AttributeEdit::Image(Some(Asset::new(vec![1, 2]))));
        assert_eq!(request.edit.text_value(), None);
    }

    #[test]
    fn test_text_request_drops_asset() {
        let input = ChangeInput::new("moon");
        let request = EditRequest::from_input(
            &Category::Nickname,
            "u1",
            &input,
            Some(Asset::new(vec![1])),
        );
        assert_eq!(request.edit, AttributeEdit::Nickname("moon".to_string()));
        assert_eq!(request.edit.kind(), "nickname");
    }
}
