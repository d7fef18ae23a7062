// src/services/qrcode_service.rs

use image::Luma;
use qrcode::{render::svg, QrCode};
use uuid::Uuid;
use crate::{
    common::error::AppError,
    db::AssetRepository,
    middleware::tenancy::TenantScope,
    services::settings_service::SettingsService,
};

// Etiqueta de patrimônio: o QR aponta para a página pública do bem
#[derive(Clone)]
pub struct QrCodeService {
    asset_repo: AssetRepository,
    settings: SettingsService,
    public_base_url: String,
}

impl QrCodeService {
    pub fn new(asset_repo: AssetRepository, settings: SettingsService, public_base_url: String) -> Self {
        Self { asset_repo, settings, public_base_url }
    }

    pub async fn render_png(&self, caller: TenantScope, asset_id: Uuid) -> Result<Vec<u8>, AppError> {
        let (code, size) = self.prepare(caller, asset_id).await?;
        render_png(&code, size)
    }

    pub async fn render_svg(&self, caller: TenantScope, asset_id: Uuid) -> Result<String, AppError> {
        let (code, size) = self.prepare(caller, asset_id).await?;
        Ok(render_svg(&code, size))
    }

    // Confere o bem e lê o tamanho configurado no momento da geração
    async fn prepare(&self, caller: TenantScope, asset_id: Uuid) -> Result<(QrCode, u32), AppError> {
        let asset = self.asset_repo
            .find_by_id(self.asset_repo.pool(), asset_id)
            .await?
            .ok_or(AppError::NotFound("Bem"))?;
        caller.ensure_admits(asset.tenant_id)?;

        let size = self.settings.qrcode().await?.size;
        let url = asset_public_url(&self.public_base_url, asset_id);

        let code = QrCode::new(url.as_bytes()).map_err(|e| {
            tracing::error!("Falha ao gerar QR Code do bem {}: {}", asset_id, e);
            AppError::InternalServerError(anyhow::Error::msg(e.to_string()))
        })?;

        Ok((code, size))
    }
}

pub fn asset_public_url(base_url: &str, asset_id: Uuid) -> String {
    format!("{}/public/assets/{}", base_url.trim_end_matches('/'), asset_id)
}

fn render_png(code: &QrCode, size: u32) -> Result<Vec<u8>, AppError> {
    let image_buffer = code.render::<Luma<u8>>().min_dimensions(size, size).build();
    let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

    // Converte para PNG em memória
    let mut buffer = Vec::new();
    dynamic_image
        .write_to(&mut buffer, image::ImageOutputFormat::Png)
        .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
    Ok(buffer)
}

fn render_svg(code: &QrCode, size: u32) -> String {
    code.render::<svg::Color>()
        .min_dimensions(size, size)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_points_to_public_page_without_double_slash() {
        let id = Uuid::nil();
        assert_eq!(
            asset_public_url("https://patrimonio.prefeitura.gov.br/", id),
            "https://patrimonio.prefeitura.gov.br/public/assets/00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn png_has_signature_and_requested_size() {
        let code = QrCode::new(asset_public_url("http://localhost:5173", Uuid::new_v4())).unwrap();
        let bytes = render_png(&code, 300).unwrap();

        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert!(decoded.to_luma8().width() >= 300);
    }

    #[test]
    fn svg_is_a_document() {
        let code = QrCode::new("http://localhost:5173/public/assets/x").unwrap();
        let svg = render_svg(&code, 200);
        assert!(svg.contains("<svg"));
    }
}
