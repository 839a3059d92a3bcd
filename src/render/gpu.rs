use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::foundation::error::{RaysError, RaysResult};
use crate::foundation::math::align_to;
use crate::render::programs::{ProgramTable, check_source};
use crate::render::{
    DrawingContext, FrameRGBA, ProgramId, RenderSettings, UniformLocation, premul_rgba8,
};
use crate::shader::source::ProgramSource;
use crate::shader::uniforms::UniformValue;

const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

struct GpuProgram {
    pipeline: wgpu::RenderPipeline,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

struct Target {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    readback: wgpu::Buffer,
    readback_bytes_per_row: u32,
}

struct Device {
    device: wgpu::Device,
    queue: wgpu::Queue,
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
}

/// `wgpu` drawing context rendering into an offscreen texture.
pub struct WgpuContext {
    settings: RenderSettings,
    gpu: Option<Device>,
    target: Option<Target>,
    programs: ProgramTable<GpuProgram>,
    width: u32,
    height: u32,
    max_dimension: u32,
    lost: Arc<AtomicBool>,
}

impl WgpuContext {
    /// Open the default adapter. `Ok(None)` when the machine has no usable adapter.
    pub fn new(width: u32, height: u32, settings: RenderSettings) -> RaysResult<Option<Self>> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let options = wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        };
        let adapter = match pollster::block_on(instance.request_adapter(&options)) {
            Ok(adapter) => adapter,
            Err(wgpu::RequestAdapterError::NotFound { .. }) => {
                tracing::warn!("no gpu adapter available");
                return Ok(None);
            }
            Err(other) => {
                return Err(RaysError::context(format!("wgpu request_adapter failed: {other:?}")));
            }
        };

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("lightrays_device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            experimental_features: wgpu::ExperimentalFeatures::default(),
            memory_hints: wgpu::MemoryHints::MemoryUsage,
            trace: wgpu::Trace::Off,
        }))
        .map_err(|e| RaysError::context(format!("wgpu request_device failed: {e:?}")))?;

        let lost = Arc::new(AtomicBool::new(false));
        let lost_flag = Arc::clone(&lost);
        device.set_device_lost_callback(move |reason, msg| {
            if !matches!(reason, wgpu::DeviceLostReason::Destroyed) {
                tracing::warn!(?reason, %msg, "gpu device lost");
            }
            lost_flag.store(true, Ordering::Release);
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lightrays_uniforms_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lightrays_pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let max_dimension = device.limits().max_texture_dimension_2d;
        let mut ctx = Self {
            settings,
            gpu: Some(Device {
                device,
                queue,
                bind_group_layout,
                pipeline_layout,
            }),
            target: None,
            programs: ProgramTable::default(),
            width: 0,
            height: 0,
            max_dimension,
            lost,
        };
        ctx.resize(width, height)?;
        Ok(Some(ctx))
    }

    fn gpu(&self) -> RaysResult<&Device> {
        if self.lost.load(Ordering::Acquire) {
            return Err(RaysError::context("gpu device lost"));
        }
        self.gpu
            .as_ref()
            .ok_or_else(|| RaysError::context("gpu context was released"))
    }
}

fn create_target(device: &wgpu::Device, width: u32, height: u32) -> RaysResult<Target> {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("lightrays_target"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: TARGET_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    let bytes_per_row_unpadded = width
        .checked_mul(4)
        .ok_or_else(|| RaysError::context("render target width overflow"))?;
    let bytes_per_row = align_to(bytes_per_row_unpadded, wgpu::COPY_BYTES_PER_ROW_ALIGNMENT);
    let size = u64::from(bytes_per_row)
        .checked_mul(u64::from(height))
        .ok_or_else(|| RaysError::context("readback buffer size overflow"))?;
    let readback = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("lightrays_readback"),
        size,
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    Ok(Target {
        texture,
        view,
        readback,
        readback_bytes_per_row: bytes_per_row,
    })
}

impl DrawingContext for WgpuContext {
    fn backend_name(&self) -> &'static str {
        "gpu"
    }

    #[tracing::instrument(skip(self, source), fields(label = source.label))]
    fn compile_program(&mut self, source: &ProgramSource) -> RaysResult<ProgramId> {
        let checked = check_source(source)?;
        let gpu = self.gpu()?;
        let device = &gpu.device;

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(source.label),
            source: wgpu::ShaderSource::Wgsl(source.wgsl.as_str().into()),
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(source.label),
            layout: Some(&gpu.pipeline_layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some(source.vertex_entry),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some(source.fragment_entry),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: TARGET_FORMAT,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(RaysError::shader(format!("{}: {err}", source.label)));
        }

        let uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lightrays_uniforms"),
            size: u64::from(checked.layout.size()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lightrays_uniforms_bg"),
            layout: &gpu.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            }],
        });

        Ok(self.programs.insert(
            checked,
            GpuProgram {
                pipeline,
                uniforms,
                bind_group,
            },
        ))
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        self.programs.location(program, name)
    }

    fn set_uniform(&mut self, location: UniformLocation, value: UniformValue) -> RaysResult<()> {
        self.gpu()?;
        self.programs.set(location, value)
    }

    fn resize(&mut self, width: u32, height: u32) -> RaysResult<()> {
        if width == 0 || height == 0 || width > self.max_dimension || height > self.max_dimension {
            return Err(RaysError::context(format!(
                "buffer {width}x{height} outside 1..={}",
                self.max_dimension
            )));
        }
        if self.target.is_some() && (width, height) == (self.width, self.height) {
            return Ok(());
        }
        let target = create_target(&self.gpu()?.device, width, height)?;
        self.target = Some(target);
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn buffer_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    fn draw(&mut self, program: ProgramId) -> RaysResult<()> {
        let gpu = self.gpu()?;
        let target = self
            .target
            .as_ref()
            .ok_or_else(|| RaysError::render("gpu target not initialized"))?;
        let staged = self.programs.get(program)?;
        gpu.queue
            .write_buffer(&staged.payload.uniforms, 0, &staged.staging);

        let clear = match self.settings.clear_rgba {
            Some([r, g, b, a]) => {
                let [r, g, b, a] = premul_rgba8(r, g, b, a);
                wgpu::Color {
                    r: f64::from(r) / 255.0,
                    g: f64::from(g) / 255.0,
                    b: f64::from(b) / 255.0,
                    a: f64::from(a) / 255.0,
                }
            }
            None => wgpu::Color::TRANSPARENT,
        };

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("lightrays_draw_encoder"),
            });
        {
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("lightrays_draw_rp"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target.view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rp.set_pipeline(&staged.payload.pipeline);
            rp.set_bind_group(0, &staged.payload.bind_group, &[]);
            rp.draw(0..3, 0..1);
        }
        gpu.queue.submit(Some(encoder.finish()));
        Ok(())
    }

    fn read_pixels(&mut self) -> RaysResult<FrameRGBA> {
        let gpu = self.gpu()?;
        let target = self
            .target
            .as_ref()
            .ok_or_else(|| RaysError::render("gpu target not initialized"))?;
        let (width, height) = (self.width, self.height);

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("lightrays_readback_encoder"),
            });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &target.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &target.readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(target.readback_bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        gpu.queue.submit(Some(encoder.finish()));

        let slice = target.readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |res| {
            let _ = tx.send(res);
        });
        gpu.device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|e| RaysError::render(format!("wgpu poll failed: {e:?}")))?;
        rx.recv()
            .map_err(|_| RaysError::render("readback channel closed"))?
            .map_err(|e| RaysError::render(format!("readback map failed: {e:?}")))?;

        let mapped = slice.get_mapped_range();
        let row_bytes = (width as usize) * 4;
        let padded_row_bytes = target.readback_bytes_per_row as usize;
        let mut data = Vec::with_capacity(row_bytes * height as usize);
        for row in 0..height as usize {
            let start = row * padded_row_bytes;
            data.extend_from_slice(&mapped[start..start + row_bytes]);
        }
        drop(mapped);
        target.readback.unmap();

        Ok(FrameRGBA {
            width,
            height,
            data,
            premultiplied: true,
        })
    }

    fn is_context_lost(&self) -> bool {
        self.gpu.is_none() || self.lost.load(Ordering::Acquire)
    }

    fn delete_program(&mut self, program: ProgramId) {
        if let Some(staged) = self.programs.remove(program) {
            staged.payload.uniforms.destroy();
        }
    }

    fn release(&mut self) {
        for staged in self.programs.drain() {
            staged.payload.uniforms.destroy();
        }
        if let Some(target) = self.target.take() {
            target.texture.destroy();
            target.readback.destroy();
        }
        if let Some(gpu) = self.gpu.take() {
            gpu.device.destroy();
            tracing::debug!("gpu context released");
        }
    }
}
