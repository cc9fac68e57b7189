use super::helpers;
use glam::Mat4;
use parallax_core::{Mesh, Shape, Vertex, OBJECT_COUNT, TOON_WGSL};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ObjectUniforms {
    pub(crate) model: [[f32; 4]; 4],
}

impl ObjectUniforms {
    pub(crate) fn from_model(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
        }
    }
}

/// GPU copy of one section object's mesh plus its model matrix binding.
pub(crate) struct ObjectDraw {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

pub(crate) struct ToonResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) objects: Vec<ObjectDraw>,
}

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

fn upload(
    device: &wgpu::Device,
    bgl: &wgpu::BindGroupLayout,
    slot: usize,
    mesh: &Mesh,
) -> ObjectDraw {
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("object_vertices"),
        contents: bytemuck::cast_slice(&mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("object_indices"),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("object_uniforms"),
        contents: bytemuck::bytes_of(&ObjectUniforms::from_model(Mat4::IDENTITY)),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });
    let bind_group = helpers::uniform_bind_group(device, "object_bg", bgl, &uniform_buffer);
    log::debug!(
        "[gpu] slot {} mesh: {} vertices, {} triangles",
        slot,
        mesh.vertices.len(),
        mesh.triangle_count()
    );
    ObjectDraw {
        vertex_buffer,
        index_buffer,
        index_count: mesh.indices.len() as u32,
        uniform_buffer,
        bind_group,
    }
}

pub(crate) fn create_toon_resources(
    device: &wgpu::Device,
    scene_bgl: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
) -> ToonResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("toon_shader"),
        source: wgpu::ShaderSource::Wgsl(TOON_WGSL.into()),
    });
    let object_bgl = helpers::uniform_layout(device, "object_bgl", wgpu::ShaderStages::VERTEX);
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("toon_pl"),
        bind_group_layouts: &[scene_bgl, &object_bgl],
        push_constant_ranges: &[],
    });
    let pipeline = helpers::make_scene_pipeline(
        device,
        "toon_pipeline",
        &pl,
        &shader,
        "vs_main",
        "fs_toon",
        &[wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRS,
        }],
        color_format,
        Some(wgpu::Face::Back),
    );
    let objects = Shape::BY_SLOT
        .iter()
        .take(OBJECT_COUNT)
        .enumerate()
        .map(|(slot, shape)| upload(device, &object_bgl, slot, &shape.build_mesh()))
        .collect();
    ToonResources { pipeline, objects }
}
