//! Signed-in user context.

use taskdesk_core::{Comment, CommentId, TaskId};
use thiserror::Error;
use tracing::info;

/// Errors raised by session operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The operation needs a signed-in user.
    #[error("no user is signed in")]
    Anonymous,
    /// Sign-in was attempted with a blank user id.
    #[error("user id must not be blank")]
    BlankUser,
}

/// Whether somebody is signed in, and who.
///
/// User ids are trusted as given; there is no credential check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    /// Nobody is signed in.
    #[default]
    Anonymous,
    /// `user` is signed in.
    Authenticated {
        /// Identifier stamped on composed comments.
        user: String,
    },
}

impl Session {
    /// Session already signed in as `user`.
    ///
    /// # Errors
    /// Returns [`SessionError::BlankUser`] for blank ids.
    pub fn authenticated(user: impl Into<String>) -> Result<Self, SessionError> {
        let mut session = Self::Anonymous;
        session.sign_in(user)?;
        Ok(session)
    }

    /// Sign in as `user`, replacing any current user.
    ///
    /// # Errors
    /// Returns [`SessionError::BlankUser`] for blank ids; the session is unchanged.
    pub fn sign_in(&mut self, user: impl Into<String>) -> Result<(), SessionError> {
        let user = user.into();
        if user.trim().is_empty() {
            return Err(SessionError::BlankUser);
        }
        info!(user = %user, "Signed in");
        *self = Self::Authenticated { user };
        Ok(())
    }

    /// Sign out, returning the user that was signed in.
    pub fn sign_out(&mut self) -> Option<String> {
        match std::mem::take(self) {
            Self::Anonymous => None,
            Self::Authenticated { user } => {
                info!(user = %user, "Signed out");
                Some(user)
            }
        }
    }

    /// Currently signed-in user.
    #[must_use]
    pub fn current_user(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { user } => Some(user),
        }
    }

    /// Returns true when somebody is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Build a comment on `task` authored by the current user.
    ///
    /// # Errors
    /// Returns [`SessionError::Anonymous`] when nobody is signed in.
    pub fn compose_comment(
        &self,
        task: &TaskId,
        text: impl Into<String>,
        parent: Option<CommentId>,
    ) -> Result<Comment, SessionError> {
        let user = self.current_user().ok_or(SessionError::Anonymous)?;
        let mut comment = Comment::compose(task, user, text);
        comment.parent_id = parent;
        Ok(comment)
    }

    /// Whether the current user authored `comment`.
    #[must_use]
    pub fn owns(&self, comment: &Comment) -> bool {
        self.current_user() == Some(comment.user_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_session_cannot_compose() {
        let session = Session::default();
        let result = session.compose_comment(&TaskId::from("1"), "hello", None);
        assert_eq!(result.err(), Some(SessionError::Anonymous));
        assert!(session.current_user().is_none());
    }

    #[test]
    fn composed_comments_carry_the_author() {
        let session =
            Session::authenticated("jane_smith").unwrap_or_else(|err| panic!("sign in: {err}"));
        let task = TaskId::from("1");
        let reply = session
            .compose_comment(&task, "agreed", Some(CommentId::from("comment_1")))
            .unwrap_or_else(|err| panic!("compose: {err}"));
        assert_eq!(reply.user_id, "jane_smith");
        assert_eq!(reply.task_id, task);
        assert_eq!(reply.parent_id, Some(CommentId::from("comment_1")));
        assert!(session.owns(&reply));
    }

    #[test]
    fn sign_in_and_out_transitions() {
        let mut session = Session::Anonymous;
        assert_eq!(session.sign_in("  "), Err(SessionError::BlankUser));
        assert!(!session.is_authenticated());

        assert_eq!(session.sign_in("alex_jones"), Ok(()));
        assert_eq!(session.current_user(), Some("alex_jones"));

        assert_eq!(session.sign_out().as_deref(), Some("alex_jones"));
        assert_eq!(session, Session::Anonymous);
        assert!(session.sign_out().is_none());
    }

    #[test]
    fn ownership_follows_the_current_user() {
        let mut session =
            Session::authenticated("alice").unwrap_or_else(|err| panic!("sign in: {err}"));
        let comment = session
            .compose_comment(&TaskId::from("1"), "mine", None)
            .unwrap_or_else(|err| panic!("compose: {err}"));
        assert!(session.owns(&comment));

        session
            .sign_in("bob")
            .unwrap_or_else(|err| panic!("sign in: {err}"));
        assert!(!session.owns(&comment));
        session.sign_out();
        assert!(!session.owns(&comment));
    }
}
