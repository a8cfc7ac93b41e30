//! Built-in scenes.

use glint_renderer::{Color, Dielectric, HittableList, Lambertian, Metal, Sphere, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Scene presets selectable from a job file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenePreset {
    /// Four spheres: diffuse, ground, fuzzy metal and a hollow glass shell
    Basic,
    /// Large random field of small spheres around three big ones
    Cover,
}

impl ScenePreset {
    pub fn build(self, seed: u64) -> HittableList {
        match self {
            ScenePreset::Basic => basic_scene(),
            ScenePreset::Cover => cover_scene(seed),
        }
    }
}

pub fn basic_scene() -> HittableList {
    HittableList::new()
        .with(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Lambertian::new(Color::new(0.8, 0.3, 0.3)),
        ))
        .with(Sphere::new(
            Vec3::new(0.0, -100.5, -1.0),
            100.0,
            Lambertian::new(Color::new(0.8, 0.8, 0.0)),
        ))
        .with(Sphere::new(
            Vec3::new(1.0, 0.0, -1.0),
            0.5,
            Metal::new(Color::new(0.8, 0.6, 0.2), 0.3),
        ))
        // Negative radius points normals inward
        .with(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), -0.5, Dielectric::new(1.5)))
}

pub fn cover_scene(seed: u64) -> HittableList {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = HittableList::new();

    // Ground
    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Lambertian::new(Color::new(0.5, 0.5, 0.5)),
    )));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f32 = rng.gen();
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                // Diffuse
                let albedo = Color::new(
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                );
                world.add(Box::new(Sphere::new(center, 0.2, Lambertian::new(albedo))));
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = Color::new(
                    0.5 * (1.0 + rng.gen::<f32>()),
                    0.5 * (1.0 + rng.gen::<f32>()),
                    0.5 * (1.0 + rng.gen::<f32>()),
                );
                let fuzz = 0.5 * rng.gen::<f32>();
                world.add(Box::new(Sphere::new(center, 0.2, Metal::new(albedo, fuzz))));
            } else {
                // Glass
                world.add(Box::new(Sphere::new(center, 0.2, Dielectric::new(1.5))));
            }
        }
    }

    world.add(Box::new(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, Dielectric::new(1.5))));
    world.add(Box::new(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Lambertian::new(Color::new(0.4, 0.2, 0.1)),
    )));
    world.add(Box::new(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Metal::new(Color::new(0.7, 0.6, 0.5), 0.0),
    )));

    log::info!("Built cover scene with {} spheres", world.len());
    world
}
