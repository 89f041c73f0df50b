//! GPU-side meshes, textures and per-object uniform slots.

use anyhow::{Result, bail};
use asset::{mesh::MeshData, texture::TextureData};
use wgpu::{
    BindGroup, BindGroupLayout, Buffer, BufferUsages, Device, IndexFormat, Queue, Sampler,
    util::DeviceExt,
};

use crate::uniforms::{GpuVertex, ObjectUniform};

/// Indexed geometry living in GPU buffers.
pub struct GpuMesh {
    pub vertex_buf: Buffer,
    pub index_buf: Buffer,
    pub index_count: u32,
    pub index_format: IndexFormat,
}

impl GpuMesh {
    pub fn upload(device: &Device, label: &str, mesh: &MeshData) -> Result<Self> {
        mesh.validate()?;
        let vertices: Vec<GpuVertex> = mesh.vertices.iter().map(GpuVertex::from).collect();
        let vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} VB")),
            contents: bytemuck::cast_slice(&vertices),
            usage: BufferUsages::VERTEX,
        });

        // 16-bit indices whenever the mesh is small enough.
        let (index_buf, index_format) = if mesh.index_format_fits_u16() {
            let indices: Vec<u16> = mesh.indices.iter().map(|&i| i as u16).collect();
            let buf = create_index_buffer(device, label, bytemuck::cast_slice(&indices));
            (buf, IndexFormat::Uint16)
        } else {
            let buf = create_index_buffer(device, label, bytemuck::cast_slice(&mesh.indices));
            (buf, IndexFormat::Uint32)
        };

        let index_count = u32::try_from(mesh.indices.len())?;
        Ok(Self {
            vertex_buf,
            index_buf,
            index_count,
            index_format,
        })
    }
}

fn create_index_buffer(device: &Device, label: &str, contents: &[u8]) -> Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{label} IB")),
        contents,
        usage: BufferUsages::INDEX,
    })
}

/// Sampled RGBA8 texture with its bind group (group 2).
pub struct GpuTexture {
    #[allow(dead_code)]
    texture: wgpu::Texture,
    pub bind_group: BindGroup,
}

impl GpuTexture {
    pub fn upload(
        device: &Device,
        queue: &Queue,
        layout: &BindGroupLayout,
        sampler: &Sampler,
        label: &str,
        data: &TextureData,
    ) -> Result<Self> {
        if !data.is_valid() {
            bail!("Texture '{label}' has inconsistent size ({}x{})", data.width, data.height);
        }
        let size = wgpu::Extent3d {
            width: data.width,
            height: data.height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &data.data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(data.width * data.bytes_per_pixel()),
                rows_per_image: Some(data.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} BG")),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        Ok(Self {
            texture,
            bind_group,
        })
    }
}

/// Uniform buffer + bind group holding one object's matrices (group 1).
pub struct GpuObject {
    pub uniform_buf: Buffer,
    pub bind_group: BindGroup,
}

impl GpuObject {
    pub fn new(device: &Device, layout: &BindGroupLayout) -> Self {
        let uniform_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Object UBO"),
            size: std::mem::size_of::<ObjectUniform>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object BG"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buf.as_entire_binding(),
            }],
        });
        Self {
            uniform_buf,
            bind_group,
        }
    }
}
