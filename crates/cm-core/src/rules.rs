//! The application's migration rule table.
//!
//! One entry per schema change that moved, renamed, or retired a field.
//! Rules are data; each runs at most once because its source key no longer
//! exists after it fires. New schema changes append here.

use cm_reconcile::{MigrationRule, MigrationTable, Transform};
use cm_tree::{KeyPath, Scalar};

fn path(s: &str) -> KeyPath {
    s.parse().expect("static rule path")
}

/// The ordered table of every migration the application has shipped.
pub fn reference_table() -> MigrationTable {
    MigrationTable::new(vec![
        MigrationRule::transform(
            path("disableThumbnails"),
            path("thumbnails.enabled"),
            Transform::NegateBool,
        ),
        MigrationRule::rename(path("thumbnailsQuality"), path("thumbnails.quality")),
        MigrationRule::transform(
            path("avatarThumbnailsPng"),
            path("thumbnails.format"),
            Transform::SelectBool {
                on_true: Scalar::String("png".to_string()),
                on_false: Scalar::String("jpg".to_string()),
            },
        ),
        MigrationRule::transform(
            path("disableChatBackup"),
            path("backups.chat.enabled"),
            Transform::NegateBool,
        ),
        MigrationRule::rename(
            path("numberOfBackups"),
            path("backups.common.numberOfBackups"),
        ),
        MigrationRule::rename(
            path("maxTotalChatBackups"),
            path("backups.chat.maxTotalBackups"),
        ),
        MigrationRule::rename(
            path("chatBackupThrottleInterval"),
            path("backups.chat.throttleInterval"),
        ),
        MigrationRule::rename(path("enableExtensions"), path("extensions.enabled")),
        MigrationRule::rename(
            path("enableExtensionsAutoUpdate"),
            path("extensions.autoUpdate"),
        ),
        MigrationRule::transform(
            path("extras.disableAutoDownload"),
            path("extensions.models.autoDownload"),
            Transform::NegateBool,
        ),
        MigrationRule::rename(
            path("extras.classificationModel"),
            path("extensions.models.classification"),
        ),
        MigrationRule::rename(
            path("extras.captioningModel"),
            path("extensions.models.captioning"),
        ),
        MigrationRule::rename(
            path("extras.embeddingModel"),
            path("extensions.models.embedding"),
        ),
        MigrationRule::rename(
            path("extras.speechToTextModel"),
            path("extensions.models.speechToText"),
        ),
        MigrationRule::rename(
            path("extras.textToSpeechModel"),
            path("extensions.models.textToSpeech"),
        ),
        MigrationRule::rename(path("minLogLevel"), path("logging.minLogLevel")),
        MigrationRule::transform(
            path("cardsCacheCapacity"),
            path("performance.memoryCacheCapacity"),
            Transform::FormatWithSuffix {
                suffix: "mb".to_string(),
            },
        ),
        MigrationRule::remove(path("cookieSecret")),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_table_is_valid() {
        let table = reference_table();
        assert_eq!(table.len(), 18);
        table.validate().expect("reference table is path-disjoint");
    }

    #[test]
    fn test_reference_table_serializes_as_data() {
        let json = serde_json::to_string(&reference_table()).expect("serialize rule table");
        assert!(json.contains("disableThumbnails"));
        assert!(json.contains("negate_bool"));
    }
}
