//! Structured resume content as produced by the parse step and fed to the rubric
//! evaluation. Keys match the JSON schema the oracle is asked to fill in.
//!
//! Deserialization is lenient: oracle output drifts, so `null` becomes the field's
//! default, scalars in string slots become strings, and a lone value where a list
//! is expected becomes a one-element list.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeFields {
    #[serde(rename = "Contact Information", default, deserialize_with = "lenient::or_default")]
    pub contact: ContactInformation,
    #[serde(rename = "Summary", default, deserialize_with = "lenient::string")]
    pub summary: Option<String>,
    #[serde(rename = "Education", default, deserialize_with = "lenient::records")]
    pub education: Vec<Education>,
    #[serde(rename = "Skills", default, deserialize_with = "lenient::skills")]
    pub skills: Skills,
    #[serde(rename = "Certifications", default, deserialize_with = "lenient::strings")]
    pub certifications: Vec<String>,
    #[serde(rename = "Projects", default, deserialize_with = "lenient::records")]
    pub projects: Vec<Project>,
    #[serde(rename = "Work Experience", default, deserialize_with = "lenient::records")]
    pub work_experience: Vec<WorkExperience>,
    #[serde(rename = "Achievements", default, deserialize_with = "lenient::strings")]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInformation {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub linkedin: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default, deserialize_with = "lenient::string")]
    pub institution: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub degree: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub cgpa: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub year_of_completion: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    #[serde(rename = "Languages", default, deserialize_with = "lenient::strings")]
    pub languages: Vec<String>,
    #[serde(rename = "Technologies", default, deserialize_with = "lenient::strings")]
    pub technologies: Vec<String>,
    #[serde(rename = "Core", default, deserialize_with = "lenient::strings")]
    pub core: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    #[serde(default, deserialize_with = "lenient::string")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub organization: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub responsibilities: Vec<String>,
}

mod lenient {
    use serde::de::{DeserializeOwned, Error};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::Skills;

    pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(scalar(Value::deserialize(deserializer)?))
    }

    pub fn strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items.into_iter().filter_map(scalar).collect(),
            other => scalar(other).into_iter().collect(),
        })
    }

    pub fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let items = match Value::deserialize(deserializer)? {
            Value::Null => return Ok(Vec::new()),
            Value::Array(items) => items,
            single @ Value::Object(_) => vec![single],
            other => return Err(D::Error::custom(format!("expected a list of records, found {other}"))),
        };
        items
            .into_iter()
            .filter(|item| !item.is_null())
            .map(|item| serde_json::from_value(item).map_err(D::Error::custom))
            .collect()
    }

    /// A flat list of skills lands in `Core`.
    pub fn skills<'de, D>(deserializer: D) -> Result<Skills, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Skills::default()),
            Value::Array(items) => Ok(Skills {
                core: items.into_iter().filter_map(scalar).collect(),
                ..Skills::default()
            }),
            other => serde_json::from_value(other).map_err(D::Error::custom),
        }
    }

    fn scalar(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_document_deserializes() {
        let fields: ResumeFields = serde_json::from_value(json!({
            "Contact Information": {
                "name": "Jane Doe",
                "email": "jane@example.com",
                "phone": "555-0100",
                "linkedin": null,
                "location": "Pune"
            },
            "Summary": "Backend engineer.",
            "Education": [{
                "institution": "IIT",
                "degree": "B.Tech",
                "department": "CSE",
                "cgpa": 8.7,
                "year_of_completion": 2024
            }],
            "Skills": {"Languages": ["Rust", "Python"], "Technologies": ["Docker"], "Core": ["DSA"]},
            "Certifications": [],
            "Projects": [{"title": "Compiler", "date": null, "details": ["Wrote a parser"]}],
            "Work Experience": [{
                "role": "Intern",
                "organization": "Acme",
                "date": "2023",
                "responsibilities": ["Built APIs"]
            }],
            "Achievements": ["ICPC regionalist"]
        }))
        .unwrap();

        assert_eq!(fields.contact.name.as_deref(), Some("Jane Doe"));
        assert_eq!(fields.contact.linkedin, None);
        assert_eq!(fields.education[0].cgpa.as_deref(), Some("8.7"));
        assert_eq!(fields.education[0].year_of_completion.as_deref(), Some("2024"));
        assert_eq!(fields.skills.languages, ["Rust", "Python"]);
        assert_eq!(fields.skills.technologies, ["Docker"]);
        assert_eq!(fields.skills.core, ["DSA"]);
        assert_eq!(fields.work_experience[0].location, None);
        assert_eq!(fields.achievements.len(), 1);
    }

    #[test]
    fn test_nulls_and_missing_fields_default() {
        let fields: ResumeFields = serde_json::from_value(json!({
            "Contact Information": null,
            "Education": null,
            "Skills": null,
            "Certifications": null
        }))
        .unwrap();
        assert_eq!(fields, ResumeFields::default());
    }

    #[test]
    fn test_lone_values_become_lists() {
        let fields: ResumeFields = serde_json::from_value(json!({
            "Certifications": "AWS Solutions Architect",
            "Projects": {"title": "Solo", "details": "One line"},
            "Skills": ["Rust", "Go"]
        }))
        .unwrap();
        assert_eq!(fields.certifications, ["AWS Solutions Architect"]);
        assert_eq!(fields.projects[0].details, ["One line"]);
        assert_eq!(fields.skills.core, ["Rust", "Go"]);
    }

    #[test]
    fn test_serializes_with_schema_keys() {
        let value = serde_json::to_value(ResumeFields::default()).unwrap();
        let object = value.as_object().unwrap();
        for key in ["Contact Information", "Work Experience", "Skills", "Achievements"] {
            assert!(object.contains_key(key), "missing {key}");
        }
        assert!(value["Skills"].get("Languages").is_some());
    }

    #[test]
    fn test_wrong_shape_for_records_is_an_error() {
        let result: Result<ResumeFields, _> = serde_json::from_value(json!({"Education": 42}));
        assert!(result.is_err());
    }
}
