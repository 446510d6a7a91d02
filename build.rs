//! Stamps the build date/time used in the `_ai_AlembicVersion` archive metadata.

fn main() {
    let now = time::OffsetDateTime::now_utc();

    let stamp = |var: &str, pattern: &str| -> String {
        if let Ok(value) = std::env::var(var) {
            return value;
        }
        time::format_description::parse(pattern)
            .ok()
            .and_then(|fmt| now.format(&fmt).ok())
            .unwrap_or_else(|| "unknown".to_string())
    };

    let date = stamp("ALEMBIC_BUILD_DATE", "[month repr:short] [day padding:space] [year]");
    let time = stamp("ALEMBIC_BUILD_TIME", "[hour]:[minute]:[second]");

    println!("cargo:rustc-env=ALEMBIC_BUILD_DATE={date}");
    println!("cargo:rustc-env=ALEMBIC_BUILD_TIME={time}");
    println!("cargo:rerun-if-env-changed=ALEMBIC_BUILD_DATE");
    println!("cargo:rerun-if-env-changed=ALEMBIC_BUILD_TIME");
}
