use serde::{Deserialize, Serialize};

/// Public fields of a GitHub user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubUser {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

impl GithubUser {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            name: None,
            company: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_unknown_api_fields() {
        let user: GithubUser = serde_json::from_str(
            r#"{"login":"octocat","id":583231,"name":"The Octocat","company":"@github","public_repos":8}"#,
        )
        .expect("profile should deserialize");

        assert_eq!(
            user,
            GithubUser::new("octocat")
                .with_name("The Octocat")
                .with_company("@github")
        );
    }

    #[test]
    fn null_optional_fields_deserialize_as_none() {
        let user: GithubUser =
            serde_json::from_str(r#"{"login":"ghost","name":null,"company":null}"#)
                .expect("profile should deserialize");

        assert_eq!(user.name, None);
        assert_eq!(user.company, None);
    }
}
