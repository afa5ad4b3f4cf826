//! Conversion logic between DTOs and domain values.

use std::time::Duration;

use crate::domain::{PlaybackStatus, QueueAction, Video};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain
// ========================================

impl From<dto::VideoDto> for Video {
    fn from(dto: dto::VideoDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            channel: dto.channel,
            thumbnail: dto.thumbnail,
            duration: Duration::from_nanos(dto.duration.max(0) as u64),
            published_at: dto.published_at,
            queued_by: dto.queued_by,
        }
    }
}

impl From<dto::PlaybackStateDto> for PlaybackStatus {
    fn from(dto: dto::PlaybackStateDto) -> Self {
        match dto {
            dto::PlaybackStateDto::Playing => Self::Playing,
            dto::PlaybackStateDto::Paused => Self::Paused,
        }
    }
}

impl dto::InitPayload {
    /// The video playing when we joined, if any.
    ///
    /// Prefers the full descriptor; falls back to a bare `videoId`. Empty IDs
    /// mean nothing is playing.
    pub fn current_video(&self) -> Option<Video> {
        pick_video(self.current_video.as_ref(), self.video_id.as_deref())
    }
}

impl dto::LoadPayload {
    /// The video to load. `None` when the server cleared the player.
    pub fn video(&self) -> Option<Video> {
        pick_video(self.video.as_ref(), self.video_id.as_deref())
    }
}

fn pick_video(video: Option<&dto::VideoDto>, video_id: Option<&str>) -> Option<Video> {
    let video = match (video, video_id) {
        (Some(video), _) => Video::from(video.clone()),
        (None, Some(id)) => Video::with_id(id),
        (None, None) => return None,
    };
    (!video.is_placeholder()).then_some(video)
}

// ========================================
// Domain → DTO
// ========================================

impl From<QueueAction> for dto::ClientMessage {
    fn from(action: QueueAction) -> Self {
        match action {
            QueueAction::Reorder { from, to } => {
                Self::ReorderQueue(dto::ReorderQueuePayload { from, to })
            }
            QueueAction::Remove { index } => {
                Self::RemoveFromQueue(dto::RemoveFromQueuePayload { index })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_video_dto() -> dto::VideoDto {
        dto::VideoDto {
            id: "abc".to_string(),
            title: "Big Buck Bunny".to_string(),
            channel: "Blender".to_string(),
            thumbnail: "https://img/abc.jpg".to_string(),
            duration: 596_000_000_000,
            published_at: "2008-05-20T00:00:00Z".to_string(),
            queued_by: "alice".to_string(),
        }
    }

    #[test]
    fn test_dto_video_to_domain() {
        // テスト項目: DTO の VideoDto がドメインの Video に変換される
        // given (前提条件):
        let dto_video = sample_video_dto();

        // when (操作):
        let video: Video = dto_video.into();

        // then (期待する結果):
        assert_eq!(video.id, "abc");
        assert_eq!(video.duration, Duration::from_secs(596));
        assert_eq!(video.queued_by, "alice");
    }

    #[test]
    fn test_negative_duration_is_clamped() {
        // テスト項目: 負の再生時間は 0 として扱われる
        // given (前提条件):
        let dto_video = dto::VideoDto {
            duration: -5,
            ..dto::VideoDto::default()
        };

        // when (操作):
        let video: Video = dto_video.into();

        // then (期待する結果):
        assert_eq!(video.duration, Duration::ZERO);
    }

    #[test]
    fn test_init_current_video_prefers_descriptor() {
        // テスト項目: currentVideo がある場合は videoId より優先される
        // given (前提条件):
        let payload = dto::InitPayload {
            current_video: Some(sample_video_dto()),
            video_id: Some("other".to_string()),
            video_pos: 0.0,
            playback_state: dto::PlaybackStateDto::Paused,
            queue: vec![],
            users: vec![],
        };

        // when (操作):
        let video = payload.current_video();

        // then (期待する結果):
        assert_eq!(video.map(|v| v.id), Some("abc".to_string()));
    }

    #[test]
    fn test_empty_video_id_means_nothing_playing() {
        // テスト項目: 空の ID は「再生中の動画なし」として扱われる
        // given (前提条件):
        let load = dto::LoadPayload {
            video: Some(dto::VideoDto::default()),
            video_id: None,
        };
        let legacy_load = dto::LoadPayload {
            video: None,
            video_id: Some(String::new()),
        };

        // when (操作):

        // then (期待する結果):
        assert_eq!(load.video(), None);
        assert_eq!(legacy_load.video(), None);
    }

    #[test]
    fn test_bare_video_id_becomes_video() {
        // テスト項目: videoId のみの場合も Video として扱われる
        // given (前提条件):
        let load = dto::LoadPayload {
            video: None,
            video_id: Some("next".to_string()),
        };

        // when (操作):
        let video = load.video();

        // then (期待する結果):
        assert_eq!(video, Some(Video::with_id("next")));
    }

    #[test]
    fn test_queue_action_to_message() {
        // テスト項目: キュー操作が送信メッセージに変換される
        // given (前提条件):
        let reorder = QueueAction::Reorder { from: 2, to: 0 };
        let remove = QueueAction::Remove { index: 1 };

        // when (操作):
        let reorder: dto::ClientMessage = reorder.into();
        let remove: dto::ClientMessage = remove.into();

        // then (期待する結果):
        assert_eq!(
            reorder,
            dto::ClientMessage::ReorderQueue(dto::ReorderQueuePayload { from: 2, to: 0 })
        );
        assert_eq!(
            remove,
            dto::ClientMessage::RemoveFromQueue(dto::RemoveFromQueuePayload { index: 1 })
        );
    }
}
