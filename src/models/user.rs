use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub have: Vec<String>,
    #[serde(default)]
    pub want: Vec<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub interests: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Profile update payload. Unset optional fields are left out of the body
/// entirely rather than sent as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub name: String,
    pub image: String,
    pub have: Vec<String>,
    pub want: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interests: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl From<&User> for UpdateUser {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            image: user.image.clone(),
            have: user.have.clone(),
            want: user.want.clone(),
            experience: user.experience.clone(),
            interests: user.interests.clone(),
            location: user.location.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_profile_fields_are_omitted() {
        let user = User {
            id: "u1".into(),
            name: "Ana".into(),
            image: "a.png".into(),
            have: vec!["tomate".into()],
            want: vec![],
            experience: None,
            interests: Some("huertos".into()),
            location: None,
            email: Some("ana@example.com".into()),
        };

        let body = serde_json::to_value(UpdateUser::from(&user)).unwrap();
        let obj = body.as_object().unwrap();
        assert!(!obj.contains_key("experience"));
        assert!(!obj.contains_key("location"));
        assert!(!obj.contains_key("email"));
        assert_eq!(obj["interests"], "huertos");
        assert_eq!(obj["have"], serde_json::json!(["tomate"]));
    }
}
