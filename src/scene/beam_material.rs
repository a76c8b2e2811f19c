use bevy::mesh::MeshVertexBufferLayoutRef;
use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::prelude::*;
use bevy::render::render_resource::{
    AsBindGroup, RenderPipelineDescriptor, SpecializedMeshPipelineError,
};
use bevy::shader::ShaderRef;

/// Additive light beam dropping from the relay point onto the region.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct BeamMaterial {
    #[uniform(0)]
    pub color: LinearRgba,
    /// x: elapsed seconds, y: intensity.
    #[uniform(1)]
    pub params: Vec4,
}

impl BeamMaterial {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self {
            color: color.to_linear(),
            params: Vec4::new(0.0, intensity, 0.0, 0.0),
        }
    }

    pub fn set_time(&mut self, seconds: f32) {
        self.params.x = seconds;
    }
}

impl Material for BeamMaterial {
    fn fragment_shader() -> ShaderRef {
        "shaders/region_beam.wgsl".into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
    }

    fn specialize(
        _pipeline: &MaterialPipeline,
        descriptor: &mut RenderPipelineDescriptor,
        _layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        descriptor.primitive.cull_mode = None;
        if let Some(depth_stencil) = descriptor.depth_stencil.as_mut() {
            depth_stencil.depth_write_enabled = false;
        }
        Ok(())
    }
}
