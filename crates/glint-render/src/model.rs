//! 3D model buffers.
//!
//! A [`Model`] stores flat float buffers shared by all of its meshes. Each
//! [`Mesh`] indexes into them through its [`Face`]s and may carry a
//! [`Material`]. Parsing model files and drawing meshes are left to
//! collaborators; this module only defines the layout and checks that it is
//! consistent.

use crate::error::{RenderError, RenderResult};
use crate::types::Color;

/// A triangle: three indices into the model's vertex buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub indices: [u32; 3],
}

/// Surface properties of a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub shininess: f32,
    /// Name of the texture asset sampled for the diffuse color.
    pub diffuse_texture: Option<String>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: Color::BLACK,
            diffuse: Color::WHITE,
            specular: Color::BLACK,
            shininess: 0.0,
            diffuse_texture: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub faces: Vec<Face>,
    pub material: Option<Material>,
}

impl Mesh {
    /// Flattened index list, three per face.
    pub fn indices(&self) -> Vec<u32> {
        self.faces.iter().flat_map(|face| face.indices).collect()
    }
}

/// Vertex buffers plus the meshes drawn from them.
///
/// `vertices`, `normals` and `tangents` hold three floats per vertex, `uvs`
/// two. Normals, UVs and tangents are optional and may be left empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    pub vertices: Vec<f32>,
    pub normals: Vec<f32>,
    pub uvs: Vec<f32>,
    pub tangents: Vec<f32>,
    pub meshes: Vec<Mesh>,
}

impl Model {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Check buffer lengths and face indices.
    pub fn validate(&self) -> RenderResult<()> {
        if self.vertices.len() % 3 != 0 {
            return Err(RenderError::InvalidModel(format!(
                "vertex buffer length {} is not a multiple of 3",
                self.vertices.len()
            )));
        }
        let count = self.vertex_count();

        for (name, buffer, stride) in [
            ("normal", &self.normals, 3),
            ("uv", &self.uvs, 2),
            ("tangent", &self.tangents, 3),
        ] {
            if !buffer.is_empty() && buffer.len() != count * stride {
                return Err(RenderError::InvalidModel(format!(
                    "{name} buffer has {} floats, expected {}",
                    buffer.len(),
                    count * stride
                )));
            }
        }

        for mesh in &self.meshes {
            if let Some(index) = mesh
                .faces
                .iter()
                .flat_map(|face| face.indices)
                .find(|&index| index as usize >= count)
            {
                return Err(RenderError::InvalidModel(format!(
                    "mesh '{}' references vertex {index} of {count}",
                    mesh.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Model {
        Model {
            vertices: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            uvs: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            meshes: vec![Mesh {
                name: "tri".into(),
                faces: vec![Face { indices: [0, 1, 2] }],
                material: Some(Material::default()),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_model() {
        let model = triangle();
        assert!(model.validate().is_ok());
        assert_eq!(model.vertex_count(), 3);
        assert_eq!(model.meshes[0].indices(), vec![0, 1, 2]);
    }

    #[test]
    fn test_out_of_range_index() {
        let mut model = triangle();
        model.meshes[0].faces.push(Face { indices: [0, 1, 3] });
        assert!(matches!(model.validate(), Err(RenderError::InvalidModel(_))));
    }

    #[test]
    fn test_mismatched_buffer() {
        let mut model = triangle();
        model.normals = vec![0.0; 4];
        assert!(model.validate().is_err());

        model.normals.clear();
        model.vertices.push(1.0);
        assert!(model.validate().is_err());
    }
}
