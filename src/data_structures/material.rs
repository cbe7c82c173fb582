//! Surface appearance attached to every draw.

/// RGBA colour. The fourth component is opacity: 1.0 is fully opaque.
pub type Colour = [f32; 4];

pub const WHITE: Colour = [1.0, 1.0, 1.0, 1.0];

/// Fixed-function style material.
///
/// The draw colour doubles as ambient and diffuse reflectance, so a material
/// only carries the terms the colour does not cover.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub specular: f32,
    pub shininess: f32,
    pub emission: f32,
}

impl Material {
    pub const DEFAULT: Material = Material {
        specular: 0.2,
        shininess: 1.0,
        emission: 0.0,
    };

    /// Polished metal, used for railings and ladders.
    pub const SHINY: Material = Material {
        specular: 0.508273,
        shininess: 100.0,
        emission: 0.0,
    };

    /// Light globes emit full white on top of the default response.
    pub const GLOWING: Material = Material {
        emission: 1.0,
        ..Material::DEFAULT
    };
}

impl Default for Material {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Appearance overrides recorded with a display list step.
///
/// Unset fields inherit whatever the referencing step resolved, so a list
/// never has to restore colour or material state for its caller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Paint {
    pub colour: Option<Colour>,
    pub material: Option<Material>,
}

impl Paint {
    pub fn resolve(&self, inherited: &Appearance) -> Appearance {
        Appearance {
            colour: self.colour.unwrap_or(inherited.colour),
            material: self.material.unwrap_or(inherited.material),
        }
    }
}

/// Fully resolved appearance of a single draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Appearance {
    pub colour: Colour,
    pub material: Material,
}

impl Appearance {
    pub fn is_translucent(&self) -> bool {
        self.colour[3] < 1.0
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            colour: WHITE,
            material: Material::DEFAULT,
        }
    }
}
