#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// One `<box label="person">`, optionally carrying an `ignore` attribute.
#[derive(Clone, Copy, Debug)]
pub enum Person {
    Plain,
    Ignore(&'static str),
}

pub fn write_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    image::RgbImage::new(width, height)
        .save(path)
        .expect("write png file");
}

pub fn person_box(person: Person) -> String {
    match person {
        Person::Plain => {
            r#"    <box label="person" occluded="0" xtl="1" ytl="1" xbr="5" ybr="9" z_order="0"/>"#
                .to_string()
        }
        Person::Ignore(value) => format!(
            r#"    <box label="person" occluded="0" xtl="1" ytl="1" xbr="5" ybr="9" z_order="0">
      <attribute name="ignore">{value}</attribute>
    </box>"#
        ),
    }
}

/// Build a CVAT XML document with one `<image>` per `(name, persons)` entry.
pub fn cvat_xml(images: &[(&str, &[Person])]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<annotations>\n  <version>1.1</version>\n",
    );
    for (idx, (name, persons)) in images.iter().enumerate() {
        xml.push_str(&format!(
            "  <image id=\"{idx}\" name=\"{name}\" width=\"8\" height=\"8\">\n"
        ));
        for person in persons.iter() {
            xml.push_str(&person_box(*person));
            xml.push('\n');
        }
        xml.push_str("    <box label=\"car\" xtl=\"0\" ytl=\"0\" xbr=\"2\" ybr=\"2\"/>\n");
        xml.push_str("  </image>\n");
    }
    xml.push_str("</annotations>\n");
    xml
}

/// Write a CVAT scene: `<root>/<scene>/annotations.xml` plus a PNG per image.
pub fn write_cvat_scene(root: &Path, scene: &str, images: &[(&str, &[Person])]) -> PathBuf {
    let dir = root.join(scene);
    fs::create_dir_all(dir.join("images")).expect("create images dir");
    fs::write(dir.join("annotations.xml"), cvat_xml(images)).expect("write annotations.xml");
    for (name, _) in images {
        write_png(&dir.join("images").join(name), 2, 2);
    }
    dir
}

/// Write a tagged scene: `ann/<frame>.json` per entry and a PNG per frame in `img/`.
///
/// `time` is the value of the `time` tag, or `None` for a document with no tags.
pub fn write_tagged_scene(root: &Path, scene: &str, frames: &[(&str, Option<&str>)]) -> PathBuf {
    let dir = root.join(scene);
    fs::create_dir_all(dir.join("ann")).expect("create ann dir");
    for (name, time) in frames {
        let json = match time {
            Some(value) => format!(
                r#"{{"description": "", "tags": [{{"name": "time", "value": "{value}"}}], "objects": []}}"#
            ),
            None => r#"{"description": "", "objects": []}"#.to_string(),
        };
        fs::write(dir.join("ann").join(format!("{name}.json")), json).expect("write ann json");
        write_png(&dir.join("img").join(name), 3, 1);
    }
    dir
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
