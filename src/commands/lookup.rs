use crate::cli::LookupArgs;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::github::GithubUser;

pub async fn run(ctx: &AppContext, args: LookupArgs) -> AppResult<()> {
    let username = required_username(&args.username)?;
    let user = ctx.github.get_user(username).await?;
    let text = describe(username, user.as_ref());
    ctx.output.emit(&text, &user)
}

/// Rejects blank input; anything else is passed through untouched.
fn required_username(raw: &str) -> AppResult<&str> {
    if raw.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "username must not be empty".to_string(),
        ));
    }

    Ok(raw)
}

fn describe(username: &str, user: Option<&GithubUser>) -> String {
    let Some(user) = user else {
        return format!("no github user named {username}");
    };

    let name = user.name.as_deref().unwrap_or("(no name)");
    let company = user.company.as_deref().unwrap_or("(no company)");
    format!("{} | {} | {}", user.login, name, company)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_checked_but_not_trimmed() {
        assert_eq!(required_username(" user ").expect("non-blank"), " user ");
        assert!(matches!(
            required_username("   "),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn describes_found_profile() {
        let user = GithubUser::new("user")
            .with_name("John Doe")
            .with_company("Contoso Blockchain");
        assert_eq!(
            describe("user", Some(&user)),
            "user | John Doe | Contoso Blockchain"
        );
    }

    #[test]
    fn describes_missing_fields_and_absence() {
        assert_eq!(
            describe("ghost", Some(&GithubUser::new("ghost"))),
            "ghost | (no name) | (no company)"
        );
        assert_eq!(
            describe("doesnotexist", None),
            "no github user named doesnotexist"
        );
    }
}
