//! Tests for override vs raw vs default precedence.

use super::super::{ClipRange, PatchPosition, Preprocessing, PreprocessingStep};
use super::*;

mod defaults_applied {
    use super::*;

    #[test]
    fn empty_inputs_get_documented_defaults() {
        let config = spectralis_sample().resolve_raw(&RawConfig::default()).unwrap();

        assert_eq!(config.patch_width, 15);
        assert_eq!(config.patch_height, 15);
        assert_eq!(config.verbosity, 1);
        assert_eq!(config.data_loader, "spectralis");
        assert_eq!(config.label_loader, "LabelsFromLabelingTool");
        assert!(!config.print_timings);
        assert!(!config.save_appearance_terms);
        assert!(!config.compute_on_accelerator);
        assert_eq!(config.num_patches_per_class, 30);
        assert!(config.center_patches);
        assert_eq!(config.patch_position, PatchPosition::Middle);
        assert_eq!(config.preprocessing, Preprocessing::default());
        assert!(!config.clip);
        assert!(config.clip_range.is_none());
    }

    #[test]
    fn directories_are_recorded_verbatim() {
        let config = spectralis_sample().resolve_raw(&RawConfig::default()).unwrap();

        assert_eq!(config.data_dir, Path::new("/data/scans"));
        assert_eq!(config.label_dir, Path::new("/data/truth"));
    }
}

mod override_precedence {
    use super::*;

    #[test]
    fn override_patch_width_beats_raw() {
        let raw = RawConfig {
            patch_width: Some(21),
            ..RawConfig::default()
        };
        let overrides = RawConfig {
            patch_width: Some(9),
            ..RawConfig::default()
        };

        let config = spectralis_sample().resolve(&raw, &overrides, 2).unwrap();

        assert_eq!(config.patch_width, 9);
    }

    #[test]
    fn raw_value_beats_default() {
        let raw = RawConfig {
            num_patches_per_class: Some(100),
            patch_position: Some(PatchPosition::Random),
            ..RawConfig::default()
        };

        let config = spectralis_sample().resolve_raw(&raw).unwrap();

        assert_eq!(config.num_patches_per_class, 100);
        assert_eq!(config.patch_position, PatchPosition::Random);
    }

    #[test]
    fn fields_are_resolved_independently() {
        let raw = RawConfig {
            patch_width: Some(21),
            patch_height: Some(31),
            ..RawConfig::default()
        };
        let overrides = RawConfig {
            patch_width: Some(9),
            ..RawConfig::default()
        };

        let config = spectralis_sample().resolve(&raw, &overrides, 2).unwrap();

        assert_eq!(config.patch_width, 9);
        assert_eq!(config.patch_height, 31);
    }

    #[test]
    fn override_false_beats_raw_true() {
        let raw = RawConfig {
            center_patches: Some(true),
            ..RawConfig::default()
        };
        let overrides = RawConfig {
            center_patches: Some(false),
            ..RawConfig::default()
        };

        let config = spectralis_sample().resolve(&raw, &overrides, 2).unwrap();

        assert!(!config.center_patches);
    }

    #[test]
    fn override_preprocessing_replaces_whole_pipeline() {
        let raw = RawConfig {
            preprocessing: Some(Preprocessing {
                patch_level: vec![PreprocessingStep::ZeroMean],
                scan_level: vec![PreprocessingStep::GaussianSmoothing { sigma: 2.0 }],
            }),
            ..RawConfig::default()
        };
        let overrides = RawConfig {
            preprocessing: Some(Preprocessing {
                patch_level: vec![PreprocessingStep::EigenspaceProjection { rank: 5 }],
                scan_level: Vec::new(),
            }),
            ..RawConfig::default()
        };

        let config = spectralis_sample().resolve(&raw, &overrides, 2).unwrap();

        assert_eq!(
            config.preprocessing.patch_level,
            vec![PreprocessingStep::EigenspaceProjection { rank: 5 }]
        );
        assert!(config.preprocessing.scan_level.is_empty());
    }

    #[test]
    fn inputs_are_not_modified() {
        let raw = RawConfig {
            patch_width: Some(21),
            ..RawConfig::default()
        };
        let overrides = RawConfig {
            patch_width: Some(9),
            ..RawConfig::default()
        };
        let raw_before = raw.clone();
        let overrides_before = overrides.clone();

        let _ = spectralis_sample().resolve(&raw, &overrides, 2).unwrap();

        assert_eq!(raw, raw_before);
        assert_eq!(overrides, overrides_before);
    }
}

mod validation {
    use super::*;

    #[test]
    fn zero_patch_width_is_rejected() {
        let raw = RawConfig {
            patch_width: Some(0),
            ..RawConfig::default()
        };

        let result = spectralis_sample().resolve_raw(&raw);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "patch_width",
                ..
            })
        ));
    }

    #[test]
    fn verbosity_above_two_is_rejected() {
        let overrides = RawConfig {
            verbosity: Some(3),
            ..RawConfig::default()
        };

        let result = spectralis_sample().resolve(&RawConfig::default(), &overrides, 2);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "verbosity",
                ..
            })
        ));
    }

    #[test]
    fn zero_patches_per_class_is_rejected() {
        let raw = RawConfig {
            num_patches_per_class: Some(0),
            ..RawConfig::default()
        };

        let result = spectralis_sample().resolve_raw(&raw);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "num_patches_per_class",
                ..
            })
        ));
    }

    #[test]
    fn even_patch_width_is_passed_through() {
        let raw = RawConfig {
            patch_width: Some(16),
            ..RawConfig::default()
        };

        let config = spectralis_sample().resolve_raw(&raw).unwrap();

        assert_eq!(config.patch_width, 16);
    }
}

mod idempotence {
    use super::*;

    #[test]
    fn resolving_a_resolved_config_changes_nothing() {
        let harness = spectralis_sample();
        let raw = RawConfig {
            patch_width: Some(21),
            verbosity: Some(2),
            label_ids: Some(vec![vec![4, 5], vec![6, 7]]),
            clip: Some(true),
            clip_range: Some(ClipRange::new(10, 700)),
            ..RawConfig::default()
        };
        let first = harness.resolve_raw(&raw).unwrap();

        let explicit = RawConfig::from(&first);
        let second = harness.resolve_raw(&explicit).unwrap();

        assert_eq!(RawConfig::from(&second), explicit);
        assert_eq!(second.scan_width, first.scan_width);
        assert_eq!(second.boundary_count, first.boundary_count);
        assert_eq!(second.regions_per_bscan, first.regions_per_bscan);
    }

    #[test]
    fn fully_specified_scalars_are_kept() {
        let raw = RawConfig {
            patch_width: Some(7),
            patch_height: Some(9),
            verbosity: Some(0),
            print_timings: Some(true),
            save_appearance_terms: Some(true),
            compute_on_accelerator: Some(true),
            num_patches_per_class: Some(12),
            center_patches: Some(false),
            patch_position: Some(PatchPosition::Random),
            clip: Some(false),
            ..RawConfig::default()
        };

        let config = spectralis_sample().resolve_raw(&raw).unwrap();
        let round_trip = RawConfig::from(&config);

        assert_eq!(round_trip.patch_width, raw.patch_width);
        assert_eq!(round_trip.patch_height, raw.patch_height);
        assert_eq!(round_trip.verbosity, raw.verbosity);
        assert_eq!(round_trip.print_timings, raw.print_timings);
        assert_eq!(round_trip.save_appearance_terms, raw.save_appearance_terms);
        assert_eq!(round_trip.compute_on_accelerator, raw.compute_on_accelerator);
        assert_eq!(round_trip.num_patches_per_class, raw.num_patches_per_class);
        assert_eq!(round_trip.center_patches, raw.center_patches);
        assert_eq!(round_trip.patch_position, raw.patch_position);
        assert_eq!(round_trip.clip, raw.clip);
    }

    #[test]
    fn derived_geometry_follows_the_probe_not_the_previous_result() {
        let first = spectralis_sample().resolve_raw(&RawConfig::default()).unwrap();
        let mut explicit = RawConfig::from(&first);
        explicit.columns_shape = None;
        explicit.columns_pred = None;
        explicit.bscan_region_bounds = None;
        explicit.edges_train = None;
        explicit.layers_train = None;
        explicit.edges_pred = None;
        explicit.layers_pred = None;

        let second = Harness::new(400, 512, 6).resolve_raw(&explicit).unwrap();

        assert_eq!(second.scan_width, 512);
        assert_eq!(second.scan_height, 400);
        assert_eq!(second.boundary_count, 6);
        assert_eq!(second.layer_count, 7);
    }
}
