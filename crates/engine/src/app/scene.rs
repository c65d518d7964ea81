use super::input::InputSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn normalized(self) -> Vec2 {
        let len_sq = self.x * self.x + self.y * self.y;
        if len_sq > 0.0 {
            let inv_len = len_sq.sqrt().recip();
            Vec2 {
                x: self.x * inv_len,
                y: self.y * inv_len,
            }
        } else {
            Vec2::ZERO
        }
    }

    pub fn scaled(self, factor: f32) -> Vec2 {
        Vec2 {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    Quit,
}

pub trait Scene {
    fn load(&mut self);
    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> SceneCommand;
    fn unload(&mut self);
    fn debug_title(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_diagonal_has_unit_length() {
        let dir = Vec2 { x: 1.0, y: -1.0 }.normalized();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!((dir.x + dir.y).abs() < 1e-6);
    }

    #[test]
    fn normalizing_zero_stays_zero() {
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
    }
}
