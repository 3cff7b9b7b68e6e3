use super::prelude::*;

/// Whoever asks to delete a review.
#[derive(Debug, Clone, Default)]
pub struct Actor {
    pub user_id: Option<UserId>,
    pub user_name: Option<String>,
    pub is_moderator: bool,
}

impl Actor {
    pub fn moderator() -> Self {
        Self {
            is_moderator: true,
            ..Self::default()
        }
    }
}

/// Deletes a review if the actor is allowed to.
///
/// Moderators may delete any review. Other actors may only delete
/// their own: a review with a recorded author id requires a matching
/// user id, an anonymous review is matched by the reviewer name.
pub fn delete_review<R: ReviewRepo>(repo: &R, actor: &Actor, id: ReviewId) -> Result<()> {
    let review = repo.get_review(id)?;
    if !may_delete(actor, &review) {
        return Err(Error::Forbidden);
    }
    Ok(repo.delete_review(id)?)
}

fn may_delete(actor: &Actor, review: &Review) -> bool {
    if actor.is_moderator {
        return true;
    }
    match review.author_id {
        Some(author_id) => actor.user_id == Some(author_id),
        None => actor.user_name.as_deref() == Some(review.user_name.as_str()),
    }
}
