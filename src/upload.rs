use crate::errors::AppError;
use crate::models::GoalForm;
use axum::extract::{multipart::MultipartError, Multipart};
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

/// Reads a multipart goal form. A non-empty `image` part is written to
/// `upload_dir` under its client-supplied name.
pub async fn read_goal_form(
    multipart: &mut Multipart,
    upload_dir: &Path,
) -> Result<GoalForm, AppError> {
    let mut form = GoalForm::default();

    while let Some(field) = multipart.next_field().await.map_err(invalid_form)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let Some(file_name) = field.file_name().and_then(stored_file_name) else {
                    continue;
                };
                let bytes = field.bytes().await.map_err(invalid_form)?;
                let path = upload_dir.join(&file_name);
                fs::write(&path, &bytes)
                    .await
                    .map_err(|err| AppError::internal("Error uploading image", err))?;
                debug!(path = %path.display(), size = bytes.len(), "stored upload");
                form.image = Some(file_name);
            }
            "goal_type" => form.goal_type = field.text().await.map_err(invalid_form)?,
            "description" => form.description = field.text().await.map_err(invalid_form)?,
            "target_days" => form.target_days = field.text().await.map_err(invalid_form)?,
            "percentage_of_achievement" => {
                form.percentage_of_achievement = field.text().await.map_err(invalid_form)?
            }
            _ => {}
        }
    }

    Ok(form)
}

fn invalid_form(err: MultipartError) -> AppError {
    warn!("rejected multipart body: {}", err.body_text());
    AppError::with_status(err.status(), "Invalid form data")
}

/// Keeps the final path component of the client filename. Browsers send an
/// empty filename when no file was picked.
fn stored_file_name(raw: &str) -> Option<String> {
    let name = raw.rsplit(['/', '\\']).next()?.trim();
    if name.is_empty() || name == "." || name == ".." {
        return None;
    }
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_plain_file_names() {
        assert_eq!(stored_file_name("run.png").as_deref(), Some("run.png"));
        assert_eq!(stored_file_name("my photo.jpg").as_deref(), Some("my photo.jpg"));
    }

    #[test]
    fn drops_directory_components() {
        assert_eq!(stored_file_name("../../etc/passwd").as_deref(), Some("passwd"));
        assert_eq!(stored_file_name("C:\\Users\\me\\run.png").as_deref(), Some("run.png"));
    }

    #[test]
    fn empty_selection_means_no_file() {
        assert_eq!(stored_file_name(""), None);
        assert_eq!(stored_file_name(".."), None);
        assert_eq!(stored_file_name("images/"), None);
    }
}
