//! Bilingual site copy: one content document per supported language.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Supported site languages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Fr];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }
}

impl FromStr for Language {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "fr" => Ok(Language::Fr),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An explicit `null` in stored or posted copy reads as the empty value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct NavLabels {
    #[serde(deserialize_with = "null_as_default")]
    pub about: String,
    #[serde(deserialize_with = "null_as_default")]
    pub initiatives: String,
    #[serde(deserialize_with = "null_as_default")]
    pub contact: String,
    #[serde(deserialize_with = "null_as_default")]
    pub donate: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroSection {
    #[serde(deserialize_with = "null_as_default")]
    pub title1: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title2: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub learn_more: String,
    #[serde(deserialize_with = "null_as_default")]
    pub get_involved: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutSection {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub paragraph1: String,
    #[serde(deserialize_with = "null_as_default")]
    pub paragraph2: String,
}

/// A single initiative card (title + description).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct InitiativeCard {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct InitiativesSection {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subtitle: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cards: Vec<InitiativeCard>,
}

/// Labels of the contact form.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub submit: String,
    #[serde(deserialize_with = "null_as_default")]
    pub success: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactSection {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// May contain `<br>` line breaks.
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub form: ContactForm,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterSection {
    #[serde(deserialize_with = "null_as_default")]
    pub copyright: String,
}

/// The editable body of a content document. Stored as one JSON column.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentSections {
    #[serde(deserialize_with = "null_as_default")]
    pub nav: NavLabels,
    #[serde(deserialize_with = "null_as_default")]
    pub hero: HeroSection,
    #[serde(deserialize_with = "null_as_default")]
    pub about: AboutSection,
    #[serde(deserialize_with = "null_as_default")]
    pub initiatives: InitiativesSection,
    #[serde(deserialize_with = "null_as_default")]
    pub contact: ContactSection,
    #[serde(deserialize_with = "null_as_default")]
    pub footer: FooterSection,
}

impl ContentSections {
    /// Replace every section named by the patch; leave the others as they are.
    pub fn apply(&mut self, patch: &ContentPatch) {
        if let Some(nav) = &patch.nav {
            self.nav = nav.clone();
        }
        if let Some(hero) = &patch.hero {
            self.hero = hero.clone();
        }
        if let Some(about) = &patch.about {
            self.about = about.clone();
        }
        if let Some(initiatives) = &patch.initiatives {
            self.initiatives = initiatives.clone();
        }
        if let Some(contact) = &patch.contact {
            self.contact = contact.clone();
        }
        if let Some(footer) = &patch.footer {
            self.footer = footer.clone();
        }
    }
}

/// The structured bilingual copy record for one language.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    pub language: Language,
    #[serde(flatten)]
    pub sections: ContentSections,
    pub updated_at: String,
}

/// Both content documents, as served by `GET /api/content`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteContent {
    pub en: ContentDocument,
    pub fr: ContentDocument,
}

impl SiteContent {
    pub fn for_language(&self, language: Language) -> &ContentDocument {
        match language {
            Language::En => &self.en,
            Language::Fr => &self.fr,
        }
    }
}

/// Section-level update of one content document.
///
/// Unknown keys such as `language`, `updatedAt` or `_id` are ignored, so a
/// client may post back a document it previously read.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContentPatch {
    #[serde(default)]
    pub nav: Option<NavLabels>,
    #[serde(default)]
    pub hero: Option<HeroSection>,
    #[serde(default)]
    pub about: Option<AboutSection>,
    #[serde(default)]
    pub initiatives: Option<InitiativesSection>,
    #[serde(default)]
    pub contact: Option<ContactSection>,
    #[serde(default)]
    pub footer: Option<FooterSection>,
}

/// Request body for `POST /api/content`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateContentRequest {
    #[serde(default)]
    pub en: Option<ContentPatch>,
    #[serde(default)]
    pub fr: Option<ContentPatch>,
}

impl UpdateContentRequest {
    /// The language patches present in the request, in a stable order.
    pub fn patches(&self) -> Vec<(Language, &ContentPatch)> {
        let mut patches = Vec::with_capacity(2);
        if let Some(en) = &self.en {
            patches.push((Language::En, en));
        }
        if let Some(fr) = &self.fr {
            patches.push((Language::Fr, fr));
        }
        patches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_language_parsing() {
        assert_eq!("en".parse::<Language>(), Ok(Language::En));
        assert_eq!("fr".parse::<Language>(), Ok(Language::Fr));
        assert!("de".parse::<Language>().is_err());
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn test_patch_replaces_named_sections_only() {
        let mut sections = ContentSections::default();
        sections.nav.about = "About Us".to_string();
        sections.footer.copyright = "old".to_string();

        let patch: ContentPatch =
            serde_json::from_value(json!({ "footer": { "copyright": "X" } })).unwrap();
        sections.apply(&patch);

        assert_eq!(sections.footer.copyright, "X");
        assert_eq!(sections.nav.about, "About Us");
    }

    #[test]
    fn test_named_section_is_replaced_whole() {
        let mut sections = ContentSections::default();
        sections.hero.title1 = "One".to_string();
        sections.hero.title2 = "Two".to_string();

        let patch: ContentPatch =
            serde_json::from_value(json!({ "hero": { "title1": "Uno" } })).unwrap();
        sections.apply(&patch);

        assert_eq!(sections.hero.title1, "Uno");
        assert_eq!(sections.hero.title2, "");
    }

    #[test]
    fn test_patch_ignores_document_metadata() {
        let patch: ContentPatch = serde_json::from_value(json!({
            "language": "fr",
            "updatedAt": "2025-01-01T00:00:00Z",
            "_id": "abc",
            "about": { "title": "Mission" }
        }))
        .unwrap();

        assert!(patch.nav.is_none());
        assert_eq!(patch.about.unwrap().title, "Mission");
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let patch: ContentPatch = serde_json::from_value(json!({
            "hero": { "title1": null, "title2": "Two" },
            "initiatives": { "title": "Work", "cards": null },
            "contact": { "form": null },
            "footer": null
        }))
        .unwrap();

        let hero = patch.hero.unwrap();
        assert_eq!(hero.title1, "");
        assert_eq!(hero.title2, "Two");
        assert!(patch.initiatives.unwrap().cards.is_empty());
        assert_eq!(patch.contact.unwrap().form, ContactForm::default());
        assert!(patch.footer.is_none());
    }

    #[test]
    fn test_update_request_patches() {
        let request: UpdateContentRequest =
            serde_json::from_value(json!({ "fr": { "footer": { "copyright": "Y" } } })).unwrap();
        let patches = request.patches();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].0, Language::Fr);
    }

    #[test]
    fn test_document_serializes_flat_camel_case() {
        let mut sections = ContentSections::default();
        sections.hero.learn_more = "Learn More".to_string();
        sections.initiatives.cards.push(InitiativeCard {
            title: "Youth".to_string(),
            description: "Mentorship".to_string(),
        });
        let document = ContentDocument {
            language: Language::En,
            sections,
            updated_at: "2025-01-01T00:00:00+00:00".to_string(),
        };

        let json = serde_json::to_value(&document).unwrap();
        assert_eq!(json["language"], "en");
        assert_eq!(json["hero"]["learnMore"], "Learn More");
        assert_eq!(json["initiatives"]["cards"][0]["title"], "Youth");
        assert_eq!(json["contact"]["form"]["submit"], "");
        assert_eq!(json["updatedAt"], "2025-01-01T00:00:00+00:00");
    }
}
