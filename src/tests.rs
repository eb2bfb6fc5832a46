//! End-to-end scenarios across the store, panel, bus and views

#[cfg(test)]
mod persistence_tests {
    use crate::theme::{
        theme_key, FileStore, KeyValueStore, MemoryStore, ThemeConfig, ThemeSection, ThemeStore,
    };
    use std::rc::Rc;

    #[test]
    fn test_missing_entry_yields_seeded_defaults() {
        let store = ThemeStore::in_memory();
        assert_eq!(store.load("7", "#123456"), ThemeConfig::with_primary("#123456"));
        assert_eq!(store.load_primary_color_only("7", "#123456"), "#123456");
    }

    #[test]
    fn test_round_trip_is_exact() {
        let store = ThemeStore::in_memory();
        let mut theme = ThemeConfig::with_primary("#0F0F0F");
        theme.set(ThemeSection::Text, "fontFamily", "Open Sans").unwrap();
        theme.set(ThemeSection::Header, "height", "96px").unwrap();
        theme.set(ThemeSection::Background, "opacity", "0.4").unwrap();
        store.save("7", &theme);

        assert_eq!(store.load("7", "#FFFFFF"), theme);
    }

    #[test]
    fn test_corrupt_entry_behaves_like_missing() {
        let backend = Rc::new(MemoryStore::new());
        let store = ThemeStore::new(backend.clone());
        backend.set_item(&theme_key("7"), "{\"colorPalette\": ").unwrap();

        assert_eq!(store.load("7", "#123456"), ThemeConfig::with_primary("#123456"));
        assert_eq!(store.load_primary_color_only("7", "#123456"), "#123456");
        assert!(store.has_entry("7"));
    }

    #[test]
    fn test_partial_document_is_completed_from_defaults() {
        let backend = Rc::new(MemoryStore::new());
        let store = ThemeStore::new(backend.clone());
        backend
            .set_item(
                &theme_key("7"),
                r##"{"colorPalette": {"accent": "#ABCDEF"}, "extra": true}"##,
            )
            .unwrap();

        let theme = store.load("7", "#123456");
        assert_eq!(theme.color_palette.primary, "#123456");
        assert_eq!(theme.color_palette.accent, "#ABCDEF");
        assert_eq!(theme.utilities, ThemeConfig::default().utilities);
        assert_eq!(store.load_primary_color_only("7", "#654321"), "#654321");
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let theme = ThemeConfig::with_primary("#112233");
        ThemeStore::new(Rc::new(FileStore::new(dir.path()))).save("site/1", &theme);

        let reopened = ThemeStore::new(Rc::new(FileStore::new(dir.path())));
        assert_eq!(reopened.load("site/1", "#000000"), theme);
        assert_eq!(reopened.load("site_1", "#000000"), ThemeConfig::with_primary("#000000"));
    }
}

#[cfg(test)]
mod generated_theme_tests {
    use crate::theme::{
        render_css, theme_key, FieldKind, KeyValueStore, MemoryStore, ThemeConfig,
        ThemeSection, ThemeStore,
    };
    use proptest::prelude::*;
    use std::rc::Rc;

    fn pt_config() -> ProptestConfig {
        ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        }
    }

    /// Themes reachable through validated edits from a seeded default
    fn arb_theme() -> impl Strategy<Value = ThemeConfig> {
        let edit = (
            any::<prop::sample::Index>(),
            any::<prop::sample::Index>(),
            "#[0-9A-F]{6}",
            0u8..=10,
            0u16..200,
        );
        ("#[0-9A-F]{6}", prop::collection::vec(edit, 0..24)).prop_map(|(primary, edits)| {
            let mut theme = ThemeConfig::with_primary(primary);
            for (section, field, color, tenths, n) in edits {
                let section = ThemeSection::ALL[section.index(ThemeSection::ALL.len())];
                let fields = section.fields();
                let spec = fields[field.index(fields.len())];
                let value = match spec.kind {
                    FieldKind::Color => color,
                    FieldKind::Choice(options) => options[n as usize % options.len()].to_string(),
                    FieldKind::Preset(options) if n % 2 == 0 => {
                        options[n as usize % options.len()].to_string()
                    }
                    FieldKind::Preset(_) => format!("{}px", n),
                    FieldKind::Opacity => format!("{:.1}", f32::from(tenths) / 10.0),
                };
                theme
                    .set(section, spec.key, &value)
                    .expect("generated values are valid");
            }
            theme
        })
    }

    proptest! {
        #![proptest_config(pt_config())]

        #[test]
        fn prop_save_then_load_is_identity(
            theme in arb_theme(),
            site_id in "[a-z0-9-]{1,12}",
            fallback in "#[0-9A-F]{6}",
        ) {
            let store = ThemeStore::in_memory();
            store.save(&site_id, &theme);
            prop_assert_eq!(store.load(&site_id, &fallback), theme.clone());
            prop_assert_eq!(
                store.load_primary_color_only(&site_id, &fallback),
                theme.color_palette.primary
            );
        }

        #[test]
        fn prop_truncated_entry_behaves_like_missing(
            theme in arb_theme(),
            cut in any::<prop::sample::Index>(),
            fallback in "#[0-9A-F]{6}",
        ) {
            let backend = Rc::new(MemoryStore::new());
            let store = ThemeStore::new(backend.clone());
            let json = serde_json::to_string(&theme).unwrap();
            let truncated = &json[..cut.index(json.len())];
            backend.set_item(&theme_key("s"), truncated).unwrap();

            prop_assert_eq!(store.load("s", &fallback), ThemeConfig::with_primary(fallback.clone()));
            prop_assert_eq!(store.load_primary_color_only("s", &fallback), fallback);
        }

        #[test]
        fn prop_rendered_css_stays_balanced(theme in arb_theme()) {
            let css = render_css("1", &theme);
            prop_assert_eq!(css.matches('{').count(), css.matches('}').count());
            prop_assert_eq!(css.matches("[data-site-theme=\"1\"]").count(), 6);
        }
    }
}

#[cfg(test)]
mod panel_tests {
    use crate::theme::{
        SaveOutcome, StyleRegistry, ThemeBus, ThemeConfig, ThemeConsumer, ThemePanel,
        ThemeSection, ThemeStore, UnavailableStore,
    };
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn panel(store: &ThemeStore, bus: &ThemeBus, site_id: &str, baseline: &str) -> ThemePanel {
        ThemePanel::new(
            site_id,
            baseline,
            store.clone(),
            bus.clone(),
            Rc::new(RefCell::new(StyleRegistry::new())),
        )
    }

    #[test]
    fn test_accent_edit_round_trip() {
        let store = ThemeStore::in_memory();
        let bus = ThemeBus::new();
        let mut panel = panel(&store, &bus, "42", "#112233");

        panel.open();
        panel
            .edit(ThemeSection::ColorPalette, "accent", "#ABCDEF")
            .unwrap();
        assert_eq!(panel.save(), SaveOutcome::Saved);

        let loaded = store.load("42", "#000000");
        assert_eq!(loaded.color_palette.primary, "#112233");
        assert_eq!(loaded.color_palette.accent, "#ABCDEF");
    }

    #[test]
    fn test_reset_then_save_persists_baseline_defaults() {
        let store = ThemeStore::in_memory();
        let bus = ThemeBus::new();
        store.save("42", &ThemeConfig::with_primary("#FFFFFF"));

        let mut panel = panel(&store, &bus, "42", "#112233");
        panel.open();
        panel.reset();
        panel.save();

        assert_eq!(store.load("42", "#000000"), ThemeConfig::with_primary("#112233"));
    }

    #[test]
    fn test_save_notifies_every_view_once() {
        let store = ThemeStore::in_memory();
        let bus = ThemeBus::new();
        let card = ThemeConsumer::mount("42", "#112233", &store, &bus);
        let page = ThemeConsumer::mount("42", "#112233", &store, &bus);
        let other_site = ThemeConsumer::mount("7", "#777777", &store, &bus);

        let received = Rc::new(Cell::new(0));
        let _counter = {
            let received = received.clone();
            bus.subscribe(move |_| received.set(received.get() + 1))
        };

        let mut panel = panel(&store, &bus, "42", "#112233");
        panel.open();
        panel
            .edit(ThemeSection::ColorPalette, "primary", "#010101")
            .unwrap();
        assert_eq!(received.get(), 0);

        panel.save();
        assert_eq!(received.get(), 1);
        assert_eq!(card.primary_color(), "#010101");
        assert_eq!(page.primary_color(), "#010101");
        assert_eq!(other_site.primary_color(), "#777777");
    }

    #[test]
    fn test_late_mount_reads_saved_color() {
        let store = ThemeStore::in_memory();
        let bus = ThemeBus::new();
        let mut panel = panel(&store, &bus, "42", "#112233");
        panel.open();
        panel
            .edit(ThemeSection::ColorPalette, "primary", "#ABABAB")
            .unwrap();
        panel.save();

        let view = ThemeConsumer::mount("42", "#112233", &store, &bus);
        assert_eq!(view.primary_color(), "#ABABAB");
        assert_eq!(view.update_count(), 0);
    }

    #[test]
    fn test_unavailable_storage_never_broadcasts() {
        let store = ThemeStore::new(Rc::new(UnavailableStore));
        let bus = ThemeBus::new();
        let view = ThemeConsumer::mount("42", "#112233", &store, &bus);

        let mut panel = panel(&store, &bus, "42", "#112233");
        panel.open();
        assert_eq!(panel.draft(), Some(&ThemeConfig::with_primary("#112233")));
        panel
            .edit(ThemeSection::ColorPalette, "primary", "#000000")
            .unwrap();

        assert_eq!(panel.save(), SaveOutcome::StorageFailed);
        assert_eq!(view.update_count(), 0);
        assert!(panel.is_dirty());
    }

    #[test]
    fn test_last_save_wins_between_panels() {
        let store = ThemeStore::in_memory();
        let bus = ThemeBus::new();
        let mut first = panel(&store, &bus, "42", "#112233");
        let mut second = panel(&store, &bus, "42", "#112233");
        first.open();
        second.open();

        first.edit(ThemeSection::Text, "fontSize", "18px").unwrap();
        second.edit(ThemeSection::Text, "fontSize", "20px").unwrap();
        first.save();
        second.save();

        assert_eq!(store.load("42", "#112233").text.font_size, "20px");
    }
}

#[cfg(test)]
mod style_tests {
    use crate::theme::{
        StyleRegistry, ThemeBus, ThemeConfig, ThemePanel, ThemeSection, ThemeStore,
    };
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_repeated_derivation_keeps_one_element_per_site() {
        let styles = Rc::new(RefCell::new(StyleRegistry::new()));
        let store = ThemeStore::in_memory();
        let bus = ThemeBus::new();
        let mut a = ThemePanel::new("a", "#111111", store.clone(), bus.clone(), styles.clone());
        let mut b = ThemePanel::new("b", "#222222", store, bus, styles.clone());

        a.open();
        a.open();
        a.edit(ThemeSection::Buttons, "borderRadius", "12px").unwrap();
        b.open();

        let registry = styles.borrow();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.count_for("a"), 1);
        let css_a = registry.css_for("a").unwrap();
        assert!(css_a.contains("--button-border-radius: 12px;"));
        assert!(css_a.contains("--color-primary: #111111;"));
        assert!(!css_a.contains("#222222"));
    }

    #[test]
    fn test_close_restores_persisted_preview() {
        let styles = Rc::new(RefCell::new(StyleRegistry::new()));
        let store = ThemeStore::in_memory();
        let mut panel =
            ThemePanel::new("a", "#111111", store, ThemeBus::new(), styles.clone());

        panel.open();
        panel
            .edit(ThemeSection::ColorPalette, "primary", "#999999")
            .unwrap();
        assert!(styles.borrow().css_for("a").unwrap().contains("#999999"));

        panel.close();
        let css = styles.borrow().css_for("a").unwrap().to_string();
        assert!(!css.contains("#999999"));
        assert_eq!(css, crate::theme::render_css("a", &ThemeConfig::with_primary("#111111")));
    }
}

#[cfg(test)]
mod scope_tests {
    use crate::theme::{
        theme_key, KeyValueStore, MemoryStore, StyleRegistry, ThemeBus, ThemePanel,
        ThemeSection, ThemeStore,
    };
    use std::cell::RefCell;
    use std::rc::Rc;

    const BREAKOUT: &str = "8px } [data-site-theme=\"2\"] .btn-primary { background-color: red";

    #[test]
    fn test_edit_cannot_write_rules_for_another_site() {
        let styles = Rc::new(RefCell::new(StyleRegistry::new()));
        let mut panel = ThemePanel::new(
            "1",
            "#111111",
            ThemeStore::in_memory(),
            ThemeBus::new(),
            styles.clone(),
        );
        panel.open();

        assert!(panel.edit(ThemeSection::Buttons, "padding", BREAKOUT).is_err());
        let css = styles.borrow().css_for("1").unwrap().to_string();
        assert!(!css.contains("[data-site-theme=\"2\"]"));
        assert!(!panel.is_dirty());
    }

    #[test]
    fn test_hand_edited_entry_stays_in_its_scope() {
        let backend = Rc::new(MemoryStore::new());
        let store = ThemeStore::new(backend.clone());
        let document = serde_json::json!({ "buttons": { "padding": BREAKOUT } });
        backend
            .set_item(&theme_key("1"), &document.to_string())
            .unwrap();

        let styles = Rc::new(RefCell::new(StyleRegistry::new()));
        let mut panel = ThemePanel::new("1", "#111111", store, ThemeBus::new(), styles.clone());
        panel.open();

        let css = styles.borrow().css_for("1").unwrap().to_string();
        assert!(!css.contains("[data-site-theme=\"2\"]"));
        assert!(css.contains("--color-primary: #111111;"));
    }
}

#[cfg(test)]
mod color_tests {
    use crate::utils::{hex_to_rgb, is_valid_hex_color, Rgb};

    #[test]
    fn test_hex_validation() {
        assert!(is_valid_hex_color("#FFF"));
        assert!(is_valid_hex_color("#FFFFFF"));
        assert!(!is_valid_hex_color("FFFFFF"));
        assert!(!is_valid_hex_color("#FF"));
    }

    #[test]
    fn test_site_colors_parse() {
        for site in crate::sites::SiteDirectory::embedded().sites() {
            assert!(hex_to_rgb(&site.color).is_some(), "{}", site.color);
        }
        assert_eq!(hex_to_rgb("#F8A5A5"), Some(Rgb::new(0xF8, 0xA5, 0xA5)));
    }
}
