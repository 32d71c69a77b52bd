use bevy::prelude::*;
use constants::vr::DEFAULT_USER_HEIGHT;

use crate::engine::vr::display::{ActiveDisplay, HeadPose};

/// Entity driven by the display's head pose.
#[derive(Component)]
pub struct HeadTracked;

/// Head transform for `pose`. Orientation falls back to the current one while
/// tracking it is lost; a missing position means a standing user at default height.
pub fn head_transform(pose: &HeadPose, current: &Transform) -> Transform {
    Transform {
        translation: pose
            .position
            .unwrap_or(Vec3::new(0.0, DEFAULT_USER_HEIGHT, 0.0)),
        rotation: pose.orientation.unwrap_or(current.rotation),
        scale: current.scale,
    }
}

pub fn update_head_pose(
    mut display: ResMut<ActiveDisplay>,
    mut heads: Query<&mut Transform, With<HeadTracked>>,
) {
    let Some(pose) = display.pose() else {
        return;
    };

    for mut transform in &mut heads {
        let next = head_transform(&pose, &transform);
        if *transform != next {
            *transform = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_only_pose_stands_at_user_height() {
        let pose = HeadPose {
            orientation: Some(Quat::from_rotation_y(0.5)),
            position: None,
        };
        let transform = head_transform(&pose, &Transform::default());

        assert_eq!(transform.translation, Vec3::new(0.0, 1.6, 0.0));
        assert_eq!(transform.rotation, Quat::from_rotation_y(0.5));
    }

    #[test]
    fn lost_orientation_keeps_the_last_one() {
        let current = Transform::from_rotation(Quat::from_rotation_x(0.2));
        let pose = HeadPose {
            orientation: None,
            position: Some(Vec3::new(0.1, 1.7, -0.3)),
        };
        let transform = head_transform(&pose, &current);

        assert_eq!(transform.rotation, current.rotation);
        assert_eq!(transform.translation, Vec3::new(0.1, 1.7, -0.3));
    }
}
