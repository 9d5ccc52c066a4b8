// src/settings/models.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub university: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub coursework: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// The site-wide profile, stored as the single `settings/profile` document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSettings {
    pub display_name: String,
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub hero_tagline: String,
    #[serde(default)]
    pub bio_extended: String,
    #[serde(default)]
    pub bio_passion: String,
    #[serde(default)]
    pub cv_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_image: Option<String>,
    #[serde(default)]
    pub education: Education,
    #[serde(default)]
    pub social_links: SocialLinks,
    #[serde(default)]
    pub updated_at: String,
}

/// Admin submit payload, everything except the server-stamped timestamp
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSettingsForm {
    pub display_name: String,
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub hero_tagline: String,
    #[serde(default)]
    pub bio_extended: String,
    #[serde(default)]
    pub bio_passion: String,
    #[serde(default)]
    pub cv_url: String,
    #[serde(default)]
    pub hero_image: Option<String>,
    #[serde(default)]
    pub about_image: Option<String>,
    #[serde(default)]
    pub education: Education,
    #[serde(default)]
    pub social_links: SocialLinks,
}
