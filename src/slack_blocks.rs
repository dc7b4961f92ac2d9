
use serde::{Serialize, Deserialize};

// https://api.slack.com/reference/block-kit/composition-objects#text
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    PlainText { text: String },
    Mrkdwn { text: String },
}

impl TextObject {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::PlainText { text: text.into() }
    }

    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self::Mrkdwn { text: text.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub text: TextObject,
    pub value: String,
}

// https://api.slack.com/reference/block-kit/block-elements
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputElement {
    PlainTextInput {
        action_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<TextObject>,
        #[serde(default)]
        initial_value: String,
    },
    StaticSelect {
        action_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<TextObject>,
        options: Vec<SelectOption>,
    },
}

// https://api.slack.com/reference/block-kit/blocks
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Section {
        text: TextObject,
    },
    Input {
        block_id: String,
        label: TextObject,
        #[serde(skip_serializing_if = "Option::is_none")]
        hint: Option<TextObject>,
        element: InputElement,
    },
}

pub fn section(text: impl Into<String>) -> Block {
    Block::Section { text: TextObject::mrkdwn(text) }
}

pub fn input(
    id: impl Into<String>,
    label: impl Into<String>,
    placeholder: impl Into<String>,
    initial_value: impl Into<String>,
    hint: impl Into<String>,
) -> Block {
    let id = id.into();
    Block::Input {
        block_id: id.clone(),
        label: TextObject::plain(label),
        hint: Some(TextObject::plain(hint)),
        element: InputElement::PlainTextInput {
            action_id: id,
            placeholder: Some(TextObject::plain(placeholder)),
            initial_value: initial_value.into(),
        },
    }
}

pub fn select(
    id: impl Into<String>,
    label: impl Into<String>,
    placeholder: impl Into<String>,
    options: Vec<SelectOption>,
) -> Block {
    let id = id.into();
    Block::Input {
        block_id: id.clone(),
        label: TextObject::plain(label),
        hint: None,
        element: InputElement::StaticSelect {
            action_id: id,
            placeholder: Some(TextObject::plain(placeholder)),
            options,
        },
    }
}

pub fn option(label: impl Into<String>, value: impl Into<String>) -> SelectOption {
    SelectOption { text: TextObject::plain(label), value: value.into() }
}

pub struct ModalSpec {
    pub id: String,
    pub title: String,
    pub trigger_id: String,
    pub blocks: Vec<Block>,
}

// https://api.slack.com/methods/views.open
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenModalRequest {
    pub trigger_id: String,
    pub view: ModalViewDefinition,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalViewDefinition {
    #[serde(rename = "type")]
    pub view_type: String,
    pub callback_id: String,
    pub title: TextObject,
    pub submit: TextObject,
    pub blocks: Vec<Block>,
}

// The modal's id becomes the view's callback id so the later submission
// routes back to the matching handler.
pub fn modal(spec: ModalSpec) -> OpenModalRequest {
    OpenModalRequest {
        trigger_id: spec.trigger_id,
        view: ModalViewDefinition {
            view_type: "modal".to_owned(),
            callback_id: spec.id,
            title: TextObject::plain(spec.title),
            submit: TextObject::plain("Submit"),
            blocks: spec.blocks,
        },
    }
}
