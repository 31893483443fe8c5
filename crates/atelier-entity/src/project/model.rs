//! Project entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use atelier_core::types::ProjectId;

/// Rendering style of the project title on the public site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "title_style", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TitleStyle {
    /// White title over the image.
    WhiteText,
    /// White title on a black band.
    WhiteOnBlack,
    /// Black title over the image.
    BlackText,
    /// Black title on a white band.
    BlackOnWhite,
}

impl Default for TitleStyle {
    fn default() -> Self {
        Self::WhiteText
    }
}

/// A portfolio project, or a collection grouping other projects.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    /// Unique project identifier.
    pub id: ProjectId,
    /// Display name.
    pub name: String,
    /// URL slug derived from the name (unique).
    pub slug: String,
    /// Whether the project is visible on the public site.
    pub is_published: bool,
    /// Dense rank among siblings sharing the same `parent_id`.
    pub order_index: i32,
    /// Whether this project is a folder-like collection.
    pub is_collection: bool,
    /// Parent collection (None for root-level projects).
    pub parent_id: Option<ProjectId>,
    /// Czech description shown on the project page.
    pub description_cs: Option<String>,
    /// English description shown on the project page.
    pub description_en: Option<String>,
    /// Cover image URL.
    pub main_image_url: Option<String>,
    /// Title rendering style.
    pub title_style: TitleStyle,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Whether this project sits at the root level.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Description for the given locale, falling back to the other one.
    pub fn description(&self, locale: atelier_core::types::Locale) -> Option<&str> {
        use atelier_core::types::Locale;
        let (primary, fallback) = match locale {
            Locale::Cs => (&self.description_cs, &self.description_en),
            Locale::En => (&self.description_en, &self.description_cs),
        };
        primary.as_deref().or(fallback.as_deref())
    }
}

/// Data required to create a new project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// Display name.
    pub name: String,
    /// Derived unique slug.
    pub slug: String,
    /// Rank among root-level siblings.
    pub order_index: i32,
    /// Whether the new project is a collection.
    pub is_collection: bool,
    /// Czech description.
    pub description_cs: Option<String>,
    /// English description.
    pub description_en: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_style_serde_snake_case() {
        let json = serde_json::to_string(&TitleStyle::WhiteOnBlack).expect("serialize");
        assert_eq!(json, "\"white_on_black\"");
        let parsed: TitleStyle = serde_json::from_str("\"black_text\"").expect("deserialize");
        assert_eq!(parsed, TitleStyle::BlackText);
    }
}
