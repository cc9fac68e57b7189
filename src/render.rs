use crate::constants::{CLEAR_OPAQUE, CLEAR_TRANSPARENT};
use parallax_core::{FrameSnapshot, ParticleField, LIGHT_DIRECTION, LIGHT_INTENSITY, TOON_STEPS};
use web_sys as web;

mod helpers;
mod meshes;
mod particles;
mod targets;

use meshes::{create_toon_resources, ObjectUniforms, ToonResources};
use particles::{create_particle_resources, ParticleResources};
use targets::DepthTarget;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    light: [f32; 4],
    color: [f32; 4],
    params: [f32; 4],
}

impl SceneUniforms {
    fn from_frame(frame: &FrameSnapshot, particle_size: f32) -> Self {
        let camera = &frame.camera;
        let view = camera.view_matrix();
        let proj = camera.projection_matrix();
        let light = LIGHT_DIRECTION.normalize_or_zero();
        let [r, g, b] = frame.material_color.to_linear();
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            light: [light.x, light.y, light.z, LIGHT_INTENSITY],
            color: [r, g, b, 1.0],
            params: [TOON_STEPS as f32, particle_size, 0.0, 0.0],
        }
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    // format the pipelines render into; the sRGB view of the surface when available
    view_format: wgpu::TextureFormat,
    depth: DepthTarget,

    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    toon: ToonResources,
    particles: ParticleResources,
    particle_size: f32,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        field: &ParticleField,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // Browsers usually only expose the unorm formats; render through an
        // sRGB view so the toon bands come out gamma-correct.
        let view_format = format.add_srgb_suffix();
        let view_formats = if view_format != format {
            vec![view_format]
        } else {
            vec![]
        };
        let (alpha_mode, clear) = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            (wgpu::CompositeAlphaMode::PreMultiplied, CLEAR_TRANSPARENT)
        } else {
            (
                caps.alpha_modes
                    .first()
                    .copied()
                    .unwrap_or(wgpu::CompositeAlphaMode::Auto),
                CLEAR_OPAQUE,
            )
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats,
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "[gpu] surface {:?} (view {:?}), alpha {:?}, {}x{}",
            format,
            view_format,
            alpha_mode,
            width,
            height
        );

        let depth = DepthTarget::new(&device, width, height);

        let scene_bgl = helpers::uniform_layout(
            &device,
            "scene_bgl",
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        );
        let scene_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bind_group =
            helpers::uniform_bind_group(&device, "scene_bg", &scene_bgl, &scene_buffer);

        let toon = create_toon_resources(&device, &scene_bgl, view_format);
        let particles = create_particle_resources(&device, &scene_bgl, view_format, field);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            view_format,
            depth,
            scene_buffer,
            scene_bind_group,
            toon,
            particles,
            particle_size: field.size,
            width,
            height,
            clear_color: wgpu::Color {
                r: clear[0],
                g: clear[1],
                b: clear[2],
                a: clear[3],
            },
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
        }
    }

    fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
        self.depth.recreate(&self.device, self.width, self.height);
    }

    pub fn render(&mut self, frame: &FrameSnapshot) -> Result<(), wgpu::SurfaceError> {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                self.surface.get_current_texture()?
            }
            Err(e) => return Err(e),
        };
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.view_format),
            ..Default::default()
        });

        let scene = SceneUniforms::from_frame(frame, self.particle_size);
        self.queue
            .write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(&scene));
        for pose in &frame.objects {
            if let Some(draw) = self.toon.objects.get(pose.slot) {
                self.queue.write_buffer(
                    &draw.uniform_buffer,
                    0,
                    bytemuck::bytes_of(&ObjectUniforms::from_model(pose.model)),
                );
            }
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_pipeline(&self.toon.pipeline);
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);
            for draw in &self.toon.objects {
                rpass.set_bind_group(1, &draw.bind_group, &[]);
                rpass.set_vertex_buffer(0, draw.vertex_buffer.slice(..));
                rpass.set_index_buffer(draw.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..draw.index_count, 0, 0..1);
            }

            if self.particles.instance_count > 0 {
                rpass.set_pipeline(&self.particles.pipeline);
                rpass.set_bind_group(0, &self.scene_bind_group, &[]);
                rpass.set_vertex_buffer(0, self.particles.quad_buffer.slice(..));
                rpass.set_vertex_buffer(1, self.particles.instance_buffer.slice(..));
                rpass.draw(0..6, 0..self.particles.instance_count);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}

