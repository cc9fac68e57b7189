use super::helpers;
use crate::constants::PARTICLE_QUAD;
use parallax_core::{ParticleField, PARTICLES_WGSL};
use wgpu::util::DeviceExt;

pub(crate) struct ParticleResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) quad_buffer: wgpu::Buffer,
    pub(crate) instance_buffer: wgpu::Buffer,
    pub(crate) instance_count: u32,
}

const CORNER_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
const CENTER_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];

/// One instanced billboard per particle; positions never change after upload.
pub(crate) fn create_particle_resources(
    device: &wgpu::Device,
    scene_bgl: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
    field: &ParticleField,
) -> ParticleResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("particles_shader"),
        source: wgpu::ShaderSource::Wgsl(PARTICLES_WGSL.into()),
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("particles_pl"),
        bind_group_layouts: &[scene_bgl],
        push_constant_ranges: &[],
    });
    let pipeline = helpers::make_scene_pipeline(
        device,
        "particles_pipeline",
        &pl,
        &shader,
        "vs_particle",
        "fs_particle",
        &[
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &CORNER_ATTRS,
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 3]>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &CENTER_ATTRS,
            },
        ],
        color_format,
        None,
    );
    let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("particle_quad"),
        contents: bytemuck::cast_slice(&PARTICLE_QUAD),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let centers: Vec<[f32; 3]> = field.positions.iter().map(|p| p.to_array()).collect();
    // zero-sized buffers are invalid; keep one dummy slot for an empty field
    let contents: &[u8] = if centers.is_empty() {
        &[0u8; 12]
    } else {
        bytemuck::cast_slice(&centers)
    };
    let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("particle_centers"),
        contents,
        usage: wgpu::BufferUsages::VERTEX,
    });
    ParticleResources {
        pipeline,
        quad_buffer,
        instance_buffer,
        instance_count: centers.len() as u32,
    }
}
