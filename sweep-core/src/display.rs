use std::path::Path;

use humansize::{DECIMAL, format_size as human_size};

/// Format bytes with decimal units (e.g. "1.50 MB")
pub fn format_size(bytes: u64) -> String {
    human_size(bytes, DECIMAL)
}

/// Format a 0.0..=1.0 fraction as a whole percentage
pub fn format_percent(fraction: f64) -> String {
    format!("{:.0}%", fraction.clamp(0.0, 1.0) * 100.0)
}

/// Format a number with thousand separators (e.g., 1,234,567)
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// Human label for a file's kind, based on its extension
pub fn describe_file_kind(path: &Path) -> String {
    let ext = match path.extension() {
        Some(ext) => ext.to_string_lossy().to_lowercase(),
        None => return "File".to_string(),
    };

    let label = match ext.as_str() {
        "app" => "Application",
        "dmg" | "iso" | "img" => "Disk Image",
        "pkg" | "deb" | "rpm" => "Package",
        "zip" | "tar" | "gz" | "tgz" | "xz" | "zst" | "rar" | "7z" => "Archive",
        "jar" | "aar" | "war" => "Java Archive",
        "crate" => "Rust Crate",
        "mp4" | "mov" | "avi" | "mkv" | "wmv" => "Video",
        "mp3" | "wav" | "aac" | "flac" => "Audio",
        "jpg" | "jpeg" | "png" | "gif" | "bmp" | "tiff" | "heic" => "Image",
        "pdf" => "PDF",
        "txt" | "rtf" | "md" => "Text Document",
        "log" => "Log File",
        "json" => "JSON Data",
        "xml" | "plist" => "Property List",
        "db" | "sqlite" | "sqlite3" => "Database",
        "o" | "a" | "rlib" | "rmeta" | "dylib" | "so" => "Build Artifact",
        "xcuserstate" | "xcactivitylog" => "Xcode Data",
        "" => return "File".to_string(),
        other => return format!("{} File", other.to_uppercase()),
    };

    label.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert!(format_size(1_500).ends_with("kB"));
        assert!(format_size(2_000_000).ends_with("MB"));
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(0.5), "50%");
        assert_eq!(format_percent(1.0), "100%");
        assert_eq!(format_percent(1.7), "100%");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_describe_file_kind() {
        assert_eq!(describe_file_kind(Path::new("/tmp/Installer.dmg")), "Disk Image");
        assert_eq!(describe_file_kind(Path::new("cache/serde-1.0.crate")), "Rust Crate");
        assert_eq!(describe_file_kind(Path::new("data.PARQUET")), "PARQUET File");
        assert_eq!(describe_file_kind(Path::new("Makefile")), "File");
    }
}
