use crate::domain::model::{AdminAccount, AppDescriptor, AppId};
use crate::utils::error::{HarnessError, Result};
use std::collections::BTreeMap;

/// Apps known to the current run, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct AppRegistry {
    apps: BTreeMap<AppId, AppDescriptor>,
}

impl AppRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_apps(ids: &[AppId]) -> Self {
        let mut registry = Self::new();
        for id in ids {
            registry.register(*id);
        }
        registry
    }

    /// Registering twice keeps the existing descriptor.
    pub fn register(&mut self, id: AppId) -> &mut AppDescriptor {
        self.apps.entry(id).or_insert_with(|| AppDescriptor::new(id))
    }

    pub fn contains(&self, id: AppId) -> bool {
        self.apps.contains_key(&id)
    }

    pub fn get(&self, id: AppId) -> Result<&AppDescriptor> {
        self.apps.get(&id).ok_or_else(|| HarnessError::AppNotFound {
            app: id.to_string(),
        })
    }

    fn get_mut(&mut self, id: AppId) -> Result<&mut AppDescriptor> {
        self.apps.get_mut(&id).ok_or_else(|| HarnessError::AppNotFound {
            app: id.to_string(),
        })
    }

    pub fn mark_installed(&mut self, id: AppId) -> Result<()> {
        self.get_mut(id)?.installed = true;
        Ok(())
    }

    pub fn set_admin(&mut self, id: AppId, admin: AdminAccount) -> Result<()> {
        self.get_mut(id)?.admin = Some(admin);
        Ok(())
    }

    pub fn admin(&self, id: AppId) -> Result<&AdminAccount> {
        self.get(id)?
            .admin
            .as_ref()
            .ok_or_else(|| HarnessError::AdminNotSet {
                app: id.to_string(),
            })
    }

    pub fn apps(&self) -> impl Iterator<Item = &AppDescriptor> {
        self.apps.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> AdminAccount {
        AdminAccount {
            id: Some("acc1".to_string()),
            username: "admin".to_string(),
        }
    }

    #[test]
    fn test_lookup_missing_app_fails() {
        let registry = AppRegistry::with_apps(&[AppId::Files]);
        assert!(matches!(
            registry.get(AppId::Accounts),
            Err(HarnessError::AppNotFound { app }) if app == "accounts"
        ));
        assert!(matches!(
            registry.admin(AppId::Accounts),
            Err(HarnessError::AppNotFound { .. })
        ));
    }

    #[test]
    fn test_admin_not_set() {
        let registry = AppRegistry::with_apps(&[AppId::Accounts]);
        assert!(matches!(
            registry.admin(AppId::Accounts),
            Err(HarnessError::AdminNotSet { .. })
        ));
    }

    #[test]
    fn test_set_and_read_admin() {
        let mut registry = AppRegistry::with_apps(&[AppId::Core, AppId::Accounts]);
        registry.set_admin(AppId::Accounts, admin()).unwrap();
        assert_eq!(registry.admin(AppId::Accounts).unwrap().username, "admin");
        assert!(registry.set_admin(AppId::Files, admin()).is_err());
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = AppRegistry::new();
        registry.register(AppId::Core);
        registry.mark_installed(AppId::Core).unwrap();
        registry.register(AppId::Core);
        assert!(registry.get(AppId::Core).unwrap().installed);
        assert_eq!(registry.apps().count(), 1);
    }

    #[test]
    fn test_apps_iterate_in_install_order() {
        let registry = AppRegistry::with_apps(&[AppId::Files, AppId::Core, AppId::Accounts]);
        let order: Vec<AppId> = registry.apps().map(|d| d.id).collect();
        assert_eq!(order, vec![AppId::Core, AppId::Accounts, AppId::Files]);
    }
}
