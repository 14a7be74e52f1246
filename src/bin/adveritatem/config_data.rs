use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;

const CONFIG_SAMPLE: &str = r#"# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location
[paths]
site_dir = "site"
template_dir = "res/template"

[defaults]
recent_post_count = 8
scroll_delay_ms = 50

[server]
address = "0.0.0.0"
port = 8001

[log]
level = "Info"
log_to_console = true
"#;

pub(crate) fn write_sample_cfg(file_path: &Path) -> io::Result<()> {
    let mut file = File::create(file_path)?;
    file.write_all(CONFIG_SAMPLE.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_valid() {
        let cfg = adveritatem::config::parse_config(CONFIG_SAMPLE).unwrap();
        assert_eq!(cfg.server.port, 8001);
        assert_eq!(cfg.recent_post_count(), 8);
    }
}
