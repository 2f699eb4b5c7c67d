//! Integration tests for loading, validation, and instancing against real files

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use resource_forge::{
    Align, CommandCanvas, DescriptorSet, DrawCommand, Point, Rect, ResourceData,
    ResourceDescriptor, ResourceError, Size, TemplateManager,
};

/// A temp project with `images/` and `sounds/` folders
struct Project {
    dir: TempDir,
}

impl Project {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("images")).unwrap();
        fs::create_dir(dir.path().join("sounds")).unwrap();
        Self { dir }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    fn write_png(&self, rel: &str, width: u32, height: u32) {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([0, 128, 255, 255]));
        let mut bytes = std::io::Cursor::new(Vec::new());
        img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
        fs::write(self.path(rel), bytes.into_inner()).unwrap();
    }

    fn write_wav(&self, rel: &str, sample_rate: u32, frames: u32) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(self.path(rel), spec).unwrap();
        for i in 0..frames {
            writer.write_sample((i % 100) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn manager(&self) -> TemplateManager {
        let mut manager = TemplateManager::new();
        manager
            .set_resource_folders([
                ("image", self.path("images")),
                ("image_sequence", self.path("images")),
                ("sound", self.path("sounds")),
                ("music", self.path("sounds")),
            ])
            .unwrap();
        manager
    }
}

fn resources(toml: &str) -> DescriptorSet {
    DescriptorSet::from_toml_str(toml).unwrap()
}

#[test]
fn test_hero_image_then_duplicate_sound() {
    let project = Project::new();
    project.write_png("images/hero.png", 32, 32);
    project.write_wav("sounds/hero.wav", 8_000, 800);
    let mut manager = project.manager();

    manager
        .load_resources(&resources(
            r#"
            [hero]
            type = "image"
            filename = "hero.png"
            "#,
        ))
        .unwrap();

    let hero = manager.create_resource_instance("hero").unwrap();
    assert_eq!(hero.size(), Size::new(32, 32));
    assert_eq!(hero.rect(), Rect::new(0, 0, 32, 32));

    let err = manager
        .load_resources(&resources(
            r#"
            [hero]
            type = "sound"
            filename = "hero.wav"
            "#,
        ))
        .unwrap_err();
    assert!(matches!(err, ResourceError::DuplicateName { .. }));
    assert_eq!(err.resource_name(), Some("hero"));
    assert_eq!(manager.get("hero").unwrap().type_tag, "image");
}

#[test]
fn test_loading_same_set_twice_fails() {
    let project = Project::new();
    project.write_png("images/a.png", 4, 4);
    project.write_png("images/b.png", 4, 4);
    let mut manager = project.manager();
    let set = resources(
        r#"
        [a]
        type = "image"
        filename = "a.png"

        [b]
        type = "image"
        filename = "b.png"
        "#,
    );

    assert_eq!(manager.load_resources(&set).unwrap(), 2);
    match manager.load_resources(&set).unwrap_err() {
        ResourceError::DuplicateName { name, .. } => assert_eq!(name, "a"),
        other => panic!("expected duplicate, got {:?}", other),
    }

    manager.clear_resources();
    assert_eq!(manager.load_resources(&set).unwrap(), 2);
}

#[test]
fn test_missing_file_reports_not_found_before_format() {
    let project = Project::new();
    let mut manager = project.manager();

    let err = manager
        .load_resources(&resources(
            r#"
            [bad]
            type = "image"
            filename = "missing.gif"
            "#,
        ))
        .unwrap_err();
    match &err {
        ResourceError::NotFound {
            resource_type,
            name,
            path,
        } => {
            assert_eq!(resource_type, "image");
            assert_eq!(name, "bad");
            assert_eq!(path, &project.path("images/missing.gif"));
        }
        other => panic!("expected not found, got {:?}", other),
    }
}

#[test]
fn test_existing_file_with_wrong_extension() {
    let project = Project::new();
    fs::write(project.path("images/notes.txt"), b"hello").unwrap();
    let mut manager = project.manager();

    let err = manager
        .load_resources(&resources(
            r#"
            [notes]
            type = "image"
            filename = "notes.txt"
            "#,
        ))
        .unwrap_err();
    assert!(matches!(err, ResourceError::InvalidFormat { .. }));
    assert!(err.to_string().contains(".png"));
}

#[test]
fn test_extension_is_case_sensitive() {
    let project = Project::new();
    project.write_png("images/HERO.PNG", 2, 2);
    let mut manager = project.manager();

    let err = manager
        .load_resources(&resources(
            r#"
            [hero]
            type = "image"
            filename = "HERO.PNG"
            "#,
        ))
        .unwrap_err();
    assert!(matches!(err, ResourceError::InvalidFormat { .. }));
}

#[test]
fn test_corrupt_image_is_decode_error() {
    let project = Project::new();
    fs::write(project.path("images/broken.png"), b"not a png").unwrap();
    let mut manager = project.manager();

    let err = manager
        .load_resources(&resources(
            r#"
            [broken]
            type = "image"
            filename = "broken.png"
            "#,
        ))
        .unwrap_err();
    assert!(matches!(err, ResourceError::Decode { .. }));
    assert_eq!(err.path(), Some(&project.path("images/broken.png")));
}

#[test]
fn test_geometry_rect_is_exact() {
    let mut manager = TemplateManager::new();
    manager
        .load_resources(&resources(
            r#"
            [ok_button]
            type = "button"
            rect = { x = 10, y = 20, width = 100, height = 40 }
            "#,
        ))
        .unwrap();

    let button = manager.create_resource_instance("ok_button").unwrap();
    assert_eq!(button.rect(), Rect::new(10, 20, 100, 40));
}

#[test]
fn test_geometry_rect_missing_fields() {
    let mut manager = TemplateManager::new();
    let err = manager
        .load_resources(&resources(
            r#"
            [panel]
            type = "interface"
            rect = { x = 10, y = "top", width = 100 }
            "#,
        ))
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("y, height"), "{}", msg);
}

#[test]
fn test_oversized_geometry_fails_at_load() {
    let mut manager = TemplateManager::new();
    let err = manager
        .load_resources(&resources(
            r#"
            [wide]
            type = "button"
            rect = { x = 2000000000, y = 0, width = 2000000000, height = 10 }
            "#,
        ))
        .unwrap_err();
    assert!(matches!(err, ResourceError::Configuration { .. }));
    let msg = err.to_string();
    assert!(msg.contains("'wide'") && msg.ends_with("x, width"), "{}", msg);
    assert!(manager.is_empty());
}

#[test]
fn test_interface_hit_rect_collision() {
    let mut manager = TemplateManager::new();
    manager
        .load_resources(&resources(
            r#"
            [panel]
            type = "interface"
            rect = { x = 50, y = 50, width = 400, height = 300 }
            hit_rect = { x = 50, y = 50, width = 400, height = 100 }
            "#,
        ))
        .unwrap();

    let mut panel = manager.create_resource_instance("panel").unwrap();
    assert_eq!(panel.hit_rect(), Rect::new(50, 50, 400, 100));
    assert!(panel.collides_with(&Rect::new(440, 140, 20, 20)));
    assert!(!panel.collides_with(&Rect::new(100, 200, 20, 20)));

    panel.set_position(Point::new(0, 0));
    assert_eq!(panel.hit_rect(), Rect::new(0, 0, 400, 100));
    assert!(!panel.collides_with(&Rect::new(440, 140, 20, 20)));
}

#[test]
fn test_sequence_frames_in_order_and_south_east_anchor() {
    let project = Project::new();
    project.write_png("images/walk_1.png", 16, 24);
    project.write_png("images/walk_2.png", 8, 8);
    project.write_png("images/walk_3.png", 4, 4);
    let mut manager = project.manager();

    manager
        .load_resources(&resources(
            r#"
            [walk]
            type = "image_sequence"
            frame_duration = 50
            files = [
                { filename = "walk_1.png" },
                { filename = "walk_2.png" },
                { filename = "walk_3.png" },
            ]
            "#,
        ))
        .unwrap();

    let entry = manager.get("walk").unwrap();
    let ResourceData::ImageSequence {
        frames,
        frame_duration,
    } = &entry.data
    else {
        panic!("expected a sequence, got {:?}", entry.data);
    };
    let sizes: Vec<(u32, u32)> = frames.iter().map(|f| (f.width, f.height)).collect();
    assert_eq!(sizes, vec![(16, 24), (8, 8), (4, 4)]);
    assert_eq!(*frame_duration, 50);
    assert_eq!(
        entry.paths,
        vec![
            project.path("images/walk_1.png"),
            project.path("images/walk_2.png"),
            project.path("images/walk_3.png"),
        ]
    );

    let mut walk = manager.create_resource_instance("walk").unwrap();
    walk.set_position(Point::new(100, 100));
    walk.set_align(Align::SouthEast);
    assert_eq!(walk.rect(), Rect::new(84, 76, 16, 24));

    walk.update(50);
    let mut canvas = CommandCanvas::new();
    walk.draw(&mut canvas);
    assert_eq!(
        canvas.drain(),
        vec![DrawCommand::Blit {
            source_size: (8, 8),
            dest: Rect::new(84, 76, 16, 24),
        }]
    );
}

#[test]
fn test_sequence_with_one_missing_frame_names_that_frame() {
    let project = Project::new();
    project.write_png("images/f1.png", 4, 4);
    let mut manager = project.manager();

    let err = manager
        .load_resources(&resources(
            r#"
            [blink]
            type = "image_sequence"
            files = [{ filename = "f1.png" }, { filename = "f2.png" }]
            "#,
        ))
        .unwrap_err();
    assert_eq!(err.path(), Some(&project.path("images/f2.png")));
}

#[test]
fn test_failed_batch_is_rolled_back() {
    let project = Project::new();
    project.write_png("images/hero.png", 32, 32);
    let mut manager = project.manager();

    let err = manager
        .load_resources(&resources(
            r#"
            [hero]
            type = "image"
            filename = "hero.png"

            [villain]
            type = "image"
            filename = "villain.png"
            "#,
        ))
        .unwrap_err();
    assert!(matches!(err, ResourceError::NotFound { .. }));
    assert!(!manager.contains("hero"));
    assert!(manager.is_empty());
}

#[test]
fn test_instances_do_not_share_state() {
    let project = Project::new();
    project.write_png("images/hero.png", 32, 32);
    let mut manager = project.manager();
    manager
        .load_resources(&resources(
            r#"
            [hero]
            type = "image"
            filename = "hero.png"
            pos = [5, 5]
            "#,
        ))
        .unwrap();

    let mut first = manager.create_resource_instance("hero").unwrap();
    let second = manager.create_resource_instance("hero").unwrap();
    first.set_size(Size::new(64, 64));
    first.set_align(Align::Center);

    assert_ne!(first.id(), second.id());
    assert_eq!(second.rect(), Rect::new(5, 5, 32, 32));
    assert_eq!(manager.create_resource_instance("hero").unwrap().rect(), second.rect());
}

#[test]
fn test_sound_and_music() {
    let project = Project::new();
    project.write_wav("sounds/click.wav", 8_000, 4_000);
    fs::write(project.path("sounds/theme.mp3"), b"ID3 stream").unwrap();
    let mut manager = project.manager();

    manager
        .load_resources(&resources(
            r#"
            [click]
            type = "sound"
            filename = "click.wav"

            [theme]
            type = "music"
            filename = "theme.mp3"
            "#,
        ))
        .unwrap();

    let click = manager.create_resource_instance("click").unwrap();
    let clip = click.sound().unwrap();
    assert_eq!(clip.sample_rate, 8_000);
    assert_eq!(clip.duration_ms(), Some(500));
    assert_eq!(click.size(), Size::default());

    let theme = manager.create_resource_instance("theme").unwrap();
    assert_eq!(theme.music().unwrap().path, project.path("sounds/theme.mp3"));
}

#[test]
fn test_mp3_is_not_a_sound() {
    let project = Project::new();
    fs::write(project.path("sounds/boom.mp3"), b"ID3").unwrap();
    let mut manager = project.manager();

    let err = manager
        .load_resources(&resources(
            r#"
            [boom]
            type = "sound"
            filename = "boom.mp3"
            "#,
        ))
        .unwrap_err();
    assert!(matches!(err, ResourceError::InvalidFormat { .. }));
}

#[test]
fn test_unset_folder() {
    let project = Project::new();
    project.write_png("images/hero.png", 4, 4);
    let mut manager = TemplateManager::new();
    let set = DescriptorSet::new()
        .with(ResourceDescriptor::new("hero", "image").with_field("filename", "hero.png"));

    let err = manager.load_resources(&set).unwrap_err();
    assert!(matches!(err, ResourceError::Configuration { .. }));

    manager
        .set_resource_folders([("image", project.path("images"))])
        .unwrap();
    manager.load_resources(&set).unwrap();
    assert!(manager.contains("hero"));
}

#[test]
fn test_folder_is_used_verbatim() {
    let project = Project::new();
    project.write_png("images/hero.png", 4, 4);
    let mut manager = TemplateManager::new();
    manager
        .set_resource_folders([("image", Path::new("does/not/exist"))])
        .unwrap();
    let err = manager
        .load_resources(&resources(
            r#"
            [hero]
            type = "image"
            filename = "hero.png"
            "#,
        ))
        .unwrap_err();
    assert_eq!(err.path(), Some(&PathBuf::from("does/not/exist/hero.png")));
}
