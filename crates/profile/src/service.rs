//! Current-user service: loads the stored profile once, then handles
//! sign-up, login, logout and XP awards, writing through to the store.

use crate::avatar::Avatar;
use crate::error::{AuthError, ProfileError, StoreError};
use crate::profile::Profile;
use crate::store::ProfileStore;

/// Anything that can bank XP for the current player.
///
/// Returns the player's new total, or `None` when nobody is logged in.
pub trait XpSink {
    fn add_xp(&mut self, amount: u32) -> Result<Option<u32>, StoreError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUp {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub avatar: Option<String>,
    pub age: Option<u32>,
    pub class_name: Option<String>,
    pub school: Option<String>,
}

impl SignUp {
    fn validate(&self) -> Result<Avatar, AuthError> {
        if self.email.trim().is_empty() {
            return Err(AuthError::EmptyEmail);
        }
        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        match self.avatar.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Ok(Avatar::classify(raw)),
            _ => Err(AuthError::AvatarRequired),
        }
    }
}

pub struct ProfileService<S: ProfileStore> {
    store: S,
    current: Option<Profile>,
}

impl<S: ProfileStore> ProfileService<S> {
    /// Read the stored profile, if any. Corrupt records load as logged out.
    pub fn load(store: S) -> Self {
        let current = store.get();
        match &current {
            Some(p) => log::info!("restored profile {} ({} xp)", p.name, p.xp),
            None => log::debug!("no stored profile"),
        }
        Self { store, current }
    }

    pub fn current(&self) -> Option<&Profile> {
        self.current.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Log in by email. The stored profile is resumed when the email
    /// matches; otherwise a fresh one is created.
    pub fn login(&mut self, email: &str) -> Result<&Profile, ProfileError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AuthError::EmptyEmail.into());
        }
        let resumed = self
            .current
            .take()
            .or_else(|| self.store.get())
            .filter(|p| p.email.eq_ignore_ascii_case(email));
        let profile = match resumed {
            Some(p) => p,
            None => Profile::new("", email, Avatar::default()),
        };
        self.persist(profile)
    }

    pub fn sign_up(&mut self, form: &SignUp) -> Result<&Profile, ProfileError> {
        let avatar = form.validate()?;
        let mut profile = Profile::new(&form.name, &form.email, avatar);
        profile.age = form.age;
        profile.class_name = form.class_name.clone().filter(|s| !s.trim().is_empty());
        profile.school = form.school.clone().filter(|s| !s.trim().is_empty());
        log::info!("signed up {}", profile.name);
        self.persist(profile)
    }

    pub fn logout(&mut self) -> Result<(), StoreError> {
        self.current = None;
        self.store.clear()
    }

    /// Replace the current profile wholesale.
    pub fn update(&mut self, profile: Profile) -> Result<&Profile, StoreError> {
        self.store.set(&profile)?;
        Ok(self.current.insert(profile))
    }

    fn persist(&mut self, profile: Profile) -> Result<&Profile, ProfileError> {
        Ok(self.update(profile)?)
    }
}

impl<S: ProfileStore> XpSink for ProfileService<S> {
    fn add_xp(&mut self, amount: u32) -> Result<Option<u32>, StoreError> {
        let Some(profile) = self.current.as_mut() else {
            log::debug!("no player logged in; dropping {amount} xp");
            return Ok(None);
        };
        if amount == 0 {
            return Ok(Some(profile.xp));
        }
        let total = profile.add_xp(amount);
        self.store.set(profile)?;
        log::info!("awarded {amount} xp, total {total}");
        Ok(Some(total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn form() -> SignUp {
        SignUp {
            name: "Leo".into(),
            email: "leo@school.org".into(),
            password: "pw".into(),
            confirm_password: "pw".into(),
            avatar: Some("🐢".into()),
            ..SignUp::default()
        }
    }

    #[test]
    fn sign_up_validation() {
        let mut svc = ProfileService::load(MemoryStore::new());

        let mut bad = form();
        bad.confirm_password = "other".into();
        assert!(matches!(
            svc.sign_up(&bad),
            Err(ProfileError::Auth(AuthError::PasswordMismatch))
        ));

        let mut bad = form();
        bad.avatar = None;
        assert!(matches!(
            svc.sign_up(&bad),
            Err(ProfileError::Auth(AuthError::AvatarRequired))
        ));
        assert!(!svc.is_logged_in());

        let p = svc.sign_up(&form()).unwrap();
        assert_eq!(p.name, "Leo");
        assert_eq!(p.avatar.label(), "🐢");
        assert!(svc.store().get().is_some());
    }

    #[test]
    fn sign_up_keeps_age() {
        let mut svc = ProfileService::load(MemoryStore::new());
        let mut with_age = form();
        with_age.age = Some(12);
        assert_eq!(svc.sign_up(&with_age).unwrap().age, Some(12));

        let raw = svc.store().raw().unwrap();
        let stored: serde_json::Value = serde_json::from_str(raw).unwrap();
        assert_eq!(stored["age"], 12);
    }

    #[test]
    fn load_recomputes_level_from_xp() {
        let raw = r#"{"id":"1","name":"Asha","email":"a@b","xp":2500,"avatar":"🦉"}"#;
        let svc = ProfileService::load(MemoryStore::with_raw(raw));
        let p = svc.current().unwrap();
        assert_eq!(p.xp, 2500);
        assert_eq!(p.level, 3);
    }

    #[test]
    fn login_resumes_matching_profile() {
        let mut svc = ProfileService::load(MemoryStore::new());
        svc.sign_up(&form()).unwrap();
        svc.add_xp(30).unwrap();

        let p = svc.login("LEO@school.org").unwrap();
        assert_eq!(p.xp, 30);
        assert_eq!(p.name, "Leo");

        let p = svc.login("new@school.org").unwrap();
        assert_eq!(p.xp, 0);
        assert_eq!(p.name, "Student");
    }

    #[test]
    fn add_xp_without_user_is_dropped() {
        let mut svc = ProfileService::load(MemoryStore::new());
        assert_eq!(svc.add_xp(25).unwrap(), None);
    }

    #[test]
    fn logout_clears_store() {
        let mut svc = ProfileService::load(MemoryStore::new());
        svc.login("a@b").unwrap();
        svc.logout().unwrap();
        assert!(svc.current().is_none());
        assert!(svc.store().get().is_none());
    }
}
