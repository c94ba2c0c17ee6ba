//! Subcommand handlers.
//!
//! Each handler checks identity first where the server would refuse an
//! anonymous caller, then makes one façade call and prints the result.

use std::path::PathBuf;

use soundvault_client::{resolve_tag_ids, SoundForm, SoundQuery, SoundVaultClient, UploadFile};
use soundvault_core::{Comment, SavedSound, Sound, User};

pub async fn login(client: &SoundVaultClient, identifier: &str, password: &str) -> anyhow::Result<()> {
    let user = client.session().login(identifier, password).await?;
    println!("Logged in as {}", describe_user(&user));
    Ok(())
}

pub async fn register(
    client: &SoundVaultClient,
    username: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    let user = client.session().register(username, email, password).await?;
    println!("Welcome, {}", describe_user(&user));
    Ok(())
}

pub async fn logout(client: &SoundVaultClient) {
    client.session().logout().await;
    println!("Logged out");
}

pub async fn refresh(client: &SoundVaultClient) -> anyhow::Result<()> {
    client.session().refresh_auth().await?;
    println!("Access token refreshed");
    Ok(())
}

pub fn whoami(client: &SoundVaultClient) -> anyhow::Result<()> {
    let user = client.session().require_user()?;
    println!("{}", describe_user(&user));
    Ok(())
}

// =============================================================================
// Sounds
// =============================================================================

/// Arguments of `sounds upload`.
pub struct Upload {
    pub name: String,
    pub description: String,
    pub audio: PathBuf,
    pub image: Option<PathBuf>,
    pub tags: Option<String>,
}

pub async fn list_sounds(
    client: &SoundVaultClient,
    tag: Option<String>,
    search: Option<String>,
) -> anyhow::Result<()> {
    let query = SoundQuery { tag, search };
    let sounds = client.sounds().list(&query).await?;

    if sounds.is_empty() {
        println!("No sounds found");
    }
    for sound in &sounds {
        println!("{}", sound_line(sound));
    }
    Ok(())
}

pub async fn show_sound(client: &SoundVaultClient, id: i64) -> anyhow::Result<()> {
    let sound = client.sounds().get(id).await?;

    println!("{}", sound_line(&sound));
    if let Some(description) = sound.description.as_deref().filter(|d| !d.is_empty()) {
        println!("  {}", description);
    }
    if let Some(url) = &sound.mp3_url {
        println!("  audio: {}", url);
    }
    if let Some(count) = sound.favorite_count {
        println!("  favorites: {}", count);
    }
    for comment in sound.comments.iter().flatten() {
        println!("  {}", comment_line(comment));
    }
    Ok(())
}

pub async fn upload_sound(client: &SoundVaultClient, upload: Upload) -> anyhow::Result<()> {
    client.session().require_admin()?;

    let mut form = SoundForm::new(upload.name)
        .description(upload.description)
        .audio(UploadFile::from_path(&upload.audio).await?);
    if let Some(image) = &upload.image {
        form = form.image(UploadFile::from_path(image).await?);
    }
    if let Some(names) = upload.tags.as_deref().filter(|n| !n.trim().is_empty()) {
        let tags = client.tags().list().await?;
        form = form.tags(resolve_tag_ids(names, &tags));
    }

    let sound = client.sounds().create(form).await?;
    println!("Uploaded {}", saved_line(&sound));
    Ok(())
}

pub async fn delete_sound(client: &SoundVaultClient, id: i64) -> anyhow::Result<()> {
    client.session().require_admin()?;
    client.sounds().delete(id).await?;
    println!("Deleted sound {}", id);
    Ok(())
}

// =============================================================================
// Tags
// =============================================================================

pub async fn list_tags(client: &SoundVaultClient) -> anyhow::Result<()> {
    for tag in client.tags().list().await? {
        println!("{:>5}  {}", tag.id, tag.name);
    }
    Ok(())
}

pub async fn create_tag(client: &SoundVaultClient, name: &str) -> anyhow::Result<()> {
    client.session().require_admin()?;
    let tag = client.tags().create(name).await?;
    println!("Created tag {} ({})", tag.name, tag.id);
    Ok(())
}

pub async fn delete_tag(client: &SoundVaultClient, id: i64) -> anyhow::Result<()> {
    client.session().require_admin()?;
    client.tags().delete(id).await?;
    println!("Deleted tag {}", id);
    Ok(())
}

// =============================================================================
// Comments
// =============================================================================

pub async fn list_comments(client: &SoundVaultClient, sound_id: i64) -> anyhow::Result<()> {
    let comments = client.comments().list(sound_id).await?;
    if comments.is_empty() {
        println!("No comments yet");
    }
    for comment in &comments {
        println!("{}", comment_line(comment));
    }
    Ok(())
}

pub async fn add_comment(
    client: &SoundVaultClient,
    sound_id: i64,
    content: &str,
) -> anyhow::Result<()> {
    client.session().require_user()?;
    let comment = client.comments().create(sound_id, content).await?;
    println!("{}", comment_line(&comment));
    Ok(())
}

pub async fn delete_comment(client: &SoundVaultClient, id: i64) -> anyhow::Result<()> {
    client.session().require_user()?;
    client.comments().delete(id).await?;
    println!("Deleted comment {}", id);
    Ok(())
}

// =============================================================================
// Favorites
// =============================================================================

pub async fn list_favorites(client: &SoundVaultClient) -> anyhow::Result<()> {
    client.session().require_user()?;
    let sounds = client.favorites().list().await?;
    if sounds.is_empty() {
        println!("No favorites yet");
    }
    for sound in &sounds {
        println!("{}", sound_line(sound));
    }
    Ok(())
}

pub async fn add_favorite(client: &SoundVaultClient, sound_id: i64) -> anyhow::Result<()> {
    client.session().require_user()?;
    client.favorites().add(sound_id).await?;
    println!("Added sound {} to favorites", sound_id);
    Ok(())
}

pub async fn remove_favorite(client: &SoundVaultClient, sound_id: i64) -> anyhow::Result<()> {
    client.session().require_user()?;
    client.favorites().remove(sound_id).await?;
    println!("Removed sound {} from favorites", sound_id);
    Ok(())
}

// =============================================================================
// Formatting
// =============================================================================

fn describe_user(user: &User) -> String {
    if user.is_admin {
        format!("{} <{}> (admin)", user.username, user.email)
    } else {
        format!("{} <{}>", user.username, user.email)
    }
}

fn sound_line(sound: &Sound) -> String {
    let mut line = format!("{:>5}  {}", sound.id, sound.name);
    if !sound.tags.is_empty() {
        let tags: Vec<&str> = sound.tags.iter().map(|t| t.name.as_str()).collect();
        line.push_str(&format!(" [{}]", tags.join(", ")));
    }
    if let Some(uploader) = &sound.uploaded_by {
        line.push_str(&format!(" by {}", uploader.username()));
    }
    if sound.is_favorite == Some(true) {
        line.push_str(" *");
    }
    line
}

fn saved_line(sound: &SavedSound) -> String {
    let mut line = format!("{:>5}  {}", sound.id, sound.name);
    if !sound.tags.is_empty() {
        let ids: Vec<String> = sound.tags.iter().map(ToString::to_string).collect();
        line.push_str(&format!(" (tag ids {})", ids.join(", ")));
    }
    line
}

fn comment_line(comment: &Comment) -> String {
    format!(
        "#{} {} ({}): {}",
        comment.id, comment.user_name, comment.created_at, comment.content
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use soundvault_core::{Tag, Uploader};

    fn sound() -> Sound {
        Sound {
            id: 3,
            name: "Rain".to_string(),
            description: None,
            image_url: None,
            mp3_url: None,
            tags: vec![
                Tag {
                    id: 1,
                    name: "Nature".to_string(),
                },
                Tag {
                    id: 2,
                    name: "Calm".to_string(),
                },
            ],
            uploaded_by: Some(Uploader::Name("admin".to_string())),
            created_at: "2024-05-01T10:00:00Z".to_string(),
            updated_at: None,
            is_favorite: Some(true),
            favorite_count: None,
            comments: None,
        }
    }

    #[test]
    fn test_sound_line() {
        assert_eq!(sound_line(&sound()), "    3  Rain [Nature, Calm] by admin *");
    }

    #[test]
    fn test_saved_line() {
        let saved = SavedSound {
            id: 10,
            name: "Rain".to_string(),
            description: None,
            mp3_file: Some("sounds/mp3/rain.mp3".to_string()),
            image: None,
            tags: vec![1, 3],
            uploaded_by: Some(1),
            created_at: None,
            updated_at: None,
        };
        assert_eq!(saved_line(&saved), "   10  Rain (tag ids 1, 3)");
    }

    #[test]
    fn test_describe_user() {
        let mut user = User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            is_admin: false,
        };
        assert_eq!(describe_user(&user), "alice <alice@example.com>");
        user.is_admin = true;
        assert!(describe_user(&user).ends_with("(admin)"));
    }
}
