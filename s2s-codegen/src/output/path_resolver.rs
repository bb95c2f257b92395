//! Logical filename -> location inside the generated project

use std::path::PathBuf;

use crate::codegen::naming;

/// Where Java sources live, relative to the project directory
pub const JAVA_SOURCE_ROOT: &str = "src/main/java";

/// Where non-Java resources live, relative to the project directory
pub const RESOURCE_ROOT: &str = "src/main/resources";

#[derive(Debug, Clone, Copy)]
enum Pattern {
    Exact(&'static str),
    Suffix(&'static str),
    Any,
}

impl Pattern {
    fn matches(&self, file_name: &str) -> bool {
        match self {
            Pattern::Exact(name) => file_name == *name,
            Pattern::Suffix(suffix) => file_name.ends_with(suffix),
            Pattern::Any => true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Location {
    /// Project directory itself
    ProjectRoot,
    /// Sub-directory of the project directory
    Directory(&'static str),
    /// Sub-package of the base package (`""` is the base package)
    Package(&'static str),
}

/// Checked in order, first match wins
static PATH_RULES: &[(Pattern, Location)] = &[
    (Pattern::Exact("pom.xml"), Location::ProjectRoot),
    (Pattern::Exact("build.gradle"), Location::ProjectRoot),
    (Pattern::Exact("application.properties"), Location::Directory(RESOURCE_ROOT)),
    (Pattern::Exact("Result.java"), Location::Package("common/api")),
    (Pattern::Exact("ResultCode.java"), Location::Package("common/api")),
    (Pattern::Exact("OpenApiConfig.java"), Location::Package("config")),
    (Pattern::Suffix("Mapper.xml"), Location::Directory("src/main/resources/mapper")),
    (Pattern::Suffix("ServiceImpl.java"), Location::Package("service/impl")),
    (Pattern::Suffix("Repository.java"), Location::Package("repository")),
    (Pattern::Suffix("Mapper.java"), Location::Package("mapper")),
    (Pattern::Suffix("Controller.java"), Location::Package("controller")),
    (Pattern::Suffix("Service.java"), Location::Package("service")),
    (Pattern::Suffix("Application.java"), Location::Package("")),
    (Pattern::Any, Location::Package("entity")),
];

/// Relative path of a logical filename inside the project directory
///
/// `SysUserMapper.java` with package `com.ming.mall` resolves to
/// `src/main/java/com/ming/mall/mapper/SysUserMapper.java`.
pub fn resolve(file_name: &str, package_name: &str) -> PathBuf {
    let location = PATH_RULES
        .iter()
        .find(|(pattern, _)| pattern.matches(file_name))
        .map(|(_, location)| *location)
        .unwrap_or(Location::Package("entity"));

    let mut path = PathBuf::new();
    match location {
        Location::ProjectRoot => {}
        Location::Directory(dir) => path.push(dir),
        Location::Package(sub_package) => {
            path.push(JAVA_SOURCE_ROOT);
            path.push(naming::package_path(package_name));
            if !sub_package.is_empty() {
                path.push(sub_package);
            }
        }
    }
    path.push(file_name);
    path
}
