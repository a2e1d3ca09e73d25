pub mod directories;
pub mod files;
pub mod gitignore;
pub mod readme;
pub mod remote;
pub mod traits;

use directories::DirectoryCheck;
use files::FileCheck;
use remote::RemoteSettingCheck;
use traits::HealthCheck;

/// The fixed check list, in report order.
pub fn default_checks() -> Vec<Box<dyn HealthCheck>> {
    vec![
        Box::new(readme::ReadmeCheck),
        Box::new(FileCheck::license()),
        Box::new(FileCheck::contributing()),
        Box::new(gitignore::GitignoreCheck),
        Box::new(FileCheck::code_of_conduct()),
        Box::new(FileCheck::security_policy()),
        Box::new(DirectoryCheck::github_actions()),
        Box::new(RemoteSettingCheck::issues()),
        Box::new(RemoteSettingCheck::wiki()),
        Box::new(RemoteSettingCheck::description()),
        Box::new(RemoteSettingCheck::topics()),
        Box::new(RemoteSettingCheck::branch_protection()),
        Box::new(DirectoryCheck::documentation()),
    ]
}
