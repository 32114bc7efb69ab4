//! Streaming output helpers.

use std::io::Write;

use anyhow::Result;

use crate::descriptor::FontDescriptor;

/// Write descriptors as a prettified JSON array.
pub fn write_json_pretty(faces: &[FontDescriptor], mut w: impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(faces)?;
    w.write_all(json.as_bytes())?;
    w.write_all(b"\n")?;
    Ok(())
}

/// Write descriptors as newline-delimited JSON (NDJSON).
pub fn write_ndjson(faces: &[FontDescriptor], mut w: impl Write) -> Result<()> {
    for face in faces {
        let line = serde_json::to_string(face)?;
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{WEIGHT_NORMAL, WIDTH_NORMAL};
    use std::path::PathBuf;

    fn sample_face() -> FontDescriptor {
        FontDescriptor {
            path: PathBuf::from("/fonts/A.ttf"),
            postscript_name: "A-Regular".to_string(),
            family: "A".to_string(),
            style: "Regular".to_string(),
            weight: WEIGHT_NORMAL,
            width: WIDTH_NORMAL,
            italic: false,
            monospace: false,
        }
    }

    #[test]
    fn ndjson_writes_one_line_per_face() {
        let faces = vec![sample_face(), sample_face()];
        let mut buf = Vec::new();

        write_ndjson(&faces, &mut buf).expect("write ndjson");

        let text = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: FontDescriptor = serde_json::from_str(lines[0]).expect("parse");
        assert_eq!(parsed.path, PathBuf::from("/fonts/A.ttf"));
    }
}
