//! End-to-end tests: SQL file + shipped templates -> generated project on disk
//!
//! Every test runs against the real template set in `templates/` at the workspace
//! root and writes into its own temporary directory.

use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use s2s_codegen::config::{BuildTool, CodegenConfig, OrmFramework, TechStackConfig};
use s2s_codegen::{CodegenBuilder, ErrorKind, PathGuard};
use tempfile::TempDir;

const SCHEMA: &str = include_str!("../fixtures/schema.sql");

fn templates_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../templates")
}

/// Temp directory holding `schema.sql` (with the given content) and an `out/` dir
fn workspace(sql: &str) -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let sql_file = dir.path().join("schema.sql");
    fs::write(&sql_file, sql).unwrap();
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();
    (dir, sql_file, out)
}

fn builder(sql_file: &Path, out: &Path) -> CodegenBuilder {
    CodegenBuilder::new(sql_file)
        .project_name("demo-shop")
        .package_name("com.acme.shop")
        .templates_dir(templates_dir())
        .output_dir(out)
}

fn read(project: &Path, relative: &str) -> String {
    fs::read_to_string(project.join(relative))
        .unwrap_or_else(|e| panic!("missing {}: {}", relative, e))
}

const JAVA: &str = "src/main/java/com/acme/shop";

#[test]
fn test_generate_mybatis_maven_project() {
    let (_dir, sql_file, out) = workspace(SCHEMA);

    let placements = builder(&sql_file, &out).generate().unwrap();
    let names: Vec<&str> = placements.iter().map(|p| p.logical_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "pom.xml",
            "application.properties",
            "Result.java",
            "ResultCode.java",
            "DemoShopApplication.java",
            "SysUser.java",
            "SysUserMapper.java",
            "SysUserMapper.xml",
            "ISysUserService.java",
            "SysUserServiceImpl.java",
            "SysUserController.java",
            "OrderItem.java",
            "OrderItemMapper.java",
            "OrderItemMapper.xml",
            "IOrderItemService.java",
            "OrderItemServiceImpl.java",
            "OrderItemController.java",
        ]
    );

    let project = out.join("demo-shop");
    for placement in &placements {
        assert!(placement.absolute_path.starts_with(&project));
        assert!(placement.absolute_path.is_file(), "{:?}", placement.absolute_path);
    }

    let pom = read(&project, "pom.xml");
    assert!(pom.contains("<artifactId>demo-shop</artifactId>"));
    assert!(pom.contains("mybatis-spring-boot-starter"));
    assert!(pom.contains("<java.version>17</java.version>"));

    let entity = read(&project, &format!("{}/entity/SysUser.java", JAVA));
    assert!(entity.starts_with("package com.acme.shop.entity;"));
    assert!(entity.contains("import java.math.BigDecimal;"));
    assert!(entity.contains("import java.time.LocalDateTime;"));
    assert!(entity.contains("@Data"));
    assert!(entity.contains("@Size(max = 64)"));
    assert!(entity.contains("private String userName;"));
    assert!(entity.contains("private BigDecimal balance;"));
    // fields follow column order
    let user_name = entity.find("userName;").unwrap();
    let created_at = entity.find("createdAt;").unwrap();
    assert!(user_name < created_at);

    let xml = read(&project, "src/main/resources/mapper/SysUserMapper.xml");
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains(r#"namespace="com.acme.shop.mapper.SysUserMapper""#));
    assert!(xml.contains("WHERE id = #{id}"));
    assert!(xml.contains("user_name = #{userName},"));

    let app = read(&project, &format!("{}/DemoShopApplication.java", JAVA));
    assert!(app.contains("public class DemoShopApplication"));
    assert!(app.contains(r#"@MapperScan("com.acme.shop.mapper")"#));

    let service = read(&project, &format!("{}/service/IOrderItemService.java", JAVA));
    assert!(service.contains("OrderItem getById(Integer id);"));
    assert!(project.join(format!("{}/service/impl/OrderItemServiceImpl.java", JAVA)).is_file());
    assert!(project.join(format!("{}/common/api/Result.java", JAVA)).is_file());
    assert!(project.join("src/main/resources/application.properties").is_file());
}

#[test]
fn test_dry_run_writes_nothing() {
    let (_dir, sql_file, out) = workspace(SCHEMA);

    let placements = builder(&sql_file, &out).dry_run().generate().unwrap();
    assert_eq!(placements.len(), 17);
    assert_eq!(
        placements[5].relative_path,
        PathBuf::from(format!("{}/entity/SysUser.java", JAVA))
    );
    assert!(!out.join("demo-shop").exists());
}

#[test]
fn test_generate_jpa_gradle_with_api_docs() {
    let (_dir, sql_file, out) = workspace(SCHEMA);
    let stack = TechStackConfig {
        orm_framework: OrmFramework::Jpa,
        build_tool: BuildTool::Gradle,
        use_api_docs: true,
        use_lombok_style_accessors: false,
        ..Default::default()
    };

    let placements = builder(&sql_file, &out).tech_stack(stack).generate().unwrap();
    let names: Vec<&str> = placements.iter().map(|p| p.logical_name.as_str()).collect();
    assert!(names.contains(&"OpenApiConfig.java"));
    assert!(names.contains(&"OrderItemRepository.java"));
    assert!(!names.iter().any(|n| n.ends_with(".xml")));

    let project = out.join("demo-shop");
    let gradle = read(&project, "build.gradle");
    assert!(gradle.contains("spring-boot-starter-data-jpa"));
    assert!(gradle.contains("springdoc-openapi"));

    let repository = read(&project, &format!("{}/repository/OrderItemRepository.java", JAVA));
    assert!(repository.contains("JpaRepository<OrderItem, Integer>"));

    let entity = read(&project, &format!("{}/entity/SysUser.java", JAVA));
    assert!(entity.contains("import io.swagger.v3.oas.annotations.media.Schema;"));
    assert!(entity.contains(r#"@Table(name = "sys_user")"#));
    assert!(entity.contains("public String getUserName()"));
    assert!(!entity.contains("@Data"));

    assert!(project.join(format!("{}/config/OpenApiConfig.java", JAVA)).is_file());
}

#[test]
fn test_generate_mybatis_plus_with_pagination_and_cache() {
    let (_dir, sql_file, out) = workspace(SCHEMA);
    let stack = TechStackConfig {
        orm_framework: OrmFramework::MyBatisPlus,
        use_pagination: true,
        use_cache: true,
        ..Default::default()
    };

    builder(&sql_file, &out).tech_stack(stack).generate().unwrap();
    let project = out.join("demo-shop");

    let service_impl = read(&project, &format!("{}/service/impl/SysUserServiceImpl.java", JAVA));
    assert!(service_impl.contains("import com.baomidou.mybatisplus.extension.plugins.pagination.Page;"));
    assert!(service_impl.contains("sysUserMapper.selectPage(new Page<>(page, size), null).getRecords()"));
    assert!(service_impl.contains("sysUserMapper.selectCount(null)"));
    assert!(service_impl.contains(r##"@Cacheable(value = "sysUser", key = "#id")"##));
    assert!(service_impl.contains("@CacheEvict"));

    let service = read(&project, &format!("{}/service/ISysUserService.java", JAVA));
    assert!(service.contains("List<SysUser> page(long page, long size);"));

    let controller = read(&project, &format!("{}/controller/SysUserController.java", JAVA));
    assert!(controller.contains(r#"@RequestParam(defaultValue = "1") long page"#));

    let app = read(&project, &format!("{}/DemoShopApplication.java", JAVA));
    assert!(app.contains("@EnableCaching"));

    let pom = read(&project, "pom.xml");
    assert!(pom.contains("mybatis-plus-spring-boot3-starter"));
    assert!(pom.contains("spring-boot-starter-data-redis"));
    assert!(!project.join("src/main/resources/mapper/SysUserMapper.xml").exists());
}

#[test]
fn test_postgres_comments_reach_entity() {
    let sql = r#"
        CREATE TABLE orders (
            id BIGSERIAL PRIMARY KEY,
            total NUMERIC(12, 2) NOT NULL
        );
        COMMENT ON TABLE orders IS 'Customer orders';
        COMMENT ON COLUMN orders.total IS 'Order total';
    "#;
    let (_dir, sql_file, out) = workspace(sql);

    builder(&sql_file, &out)
        .dialect("postgresql")
        .orm_framework(OrmFramework::MyBatisPlus)
        .generate()
        .unwrap();

    let entity = read(&out.join("demo-shop"), &format!("{}/entity/Orders.java", JAVA));
    assert!(entity.contains(" * Customer orders"));
    assert!(entity.contains("/** Order total */"));
    assert!(entity.contains(r#"@TableName("orders")"#));
}

#[test]
fn test_output_outside_allowed_dir_is_rejected() {
    let (dir, sql_file, out) = workspace(SCHEMA);
    let allowed = dir.path().join("allowed");
    fs::create_dir_all(&allowed).unwrap();

    let err = builder(&sql_file, &out)
        .allowed_base_dir(&allowed)
        .generate()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Security);
    assert!(!out.join("demo-shop").exists());
}

#[test]
fn test_schema_without_tables() {
    let (_dir, sql_file, out) = workspace("INSERT INTO t (a) VALUES (1);");
    let err = builder(&sql_file, &out).generate().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn test_missing_templates_dir() {
    let (dir, sql_file, out) = workspace(SCHEMA);
    let err = builder(&sql_file, &out)
        .templates_dir(dir.path().join("no-templates"))
        .generate()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn test_pack_generated_project() {
    let (_dir, sql_file, out) = workspace(SCHEMA);
    let builder = builder(&sql_file, &out);
    let config: CodegenConfig = builder.config().clone();
    builder.generate().unwrap();

    let guard = PathGuard::new(config.allowed_base_dir()).unwrap();
    let bytes = s2s_codegen::output::pack_project(out.join("demo-shop"), &guard).unwrap();

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    assert_eq!(archive.len(), 17);
    let mut pom = String::new();
    archive
        .by_name("pom.xml")
        .unwrap()
        .read_to_string(&mut pom)
        .unwrap();
    assert!(pom.contains("<artifactId>demo-shop</artifactId>"));
    assert!(archive
        .by_name("src/main/java/com/acme/shop/controller/SysUserController.java")
        .is_ok());

    assert_eq!(
        s2s_codegen::archive_path(&config),
        out.join("demo-shop.zip")
    );
}

#[test]
fn test_placements_serialize_to_json() {
    let (_dir, sql_file, out) = workspace(SCHEMA);
    let placements = builder(&sql_file, &out).dry_run().generate().unwrap();

    let json = serde_json::to_value(&placements).unwrap();
    assert_eq!(json[0]["logicalName"], "pom.xml");
    assert_eq!(json[0]["relativePath"], "pom.xml");
}
